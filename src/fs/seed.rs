//! The tree every new session starts from.

use super::types::{FileSystem, Node};

/// Build the seed tree.
///
/// Child order matters: `ls` lists entries in the order they appear here.
pub fn initial_file_system() -> FileSystem {
    let echo_shell = directory([
        (
            "README.md",
            Node::file("# Echo Shell\nA terminal emulator built with Next.js and AI."),
        ),
        (
            "package.json",
            Node::file(r#"{ "name": "echo-shell", "version": "1.0.0" }"#),
        ),
    ]);

    let user = directory([
        ("projects", directory([("echo-shell", echo_shell)])),
        (
            "documents",
            directory([
                ("notes.txt", Node::file("Remember to buy milk.")),
                ("plan.md", Node::file("1. Build terminal\n2. Add AI\n3. ???\n4. Profit")),
            ]),
        ),
        (
            "welcome.txt",
            Node::file("Welcome to Echo Shell! Type `help` to see available commands."),
        ),
    ]);

    let root = directory([("home", directory([("user", user)]))]);
    // Names above are literals without '/', so conversion cannot fail.
    FileSystem::try_from(root).unwrap_or_default()
}

fn directory<const N: usize>(entries: [(&str, Node); N]) -> Node {
    Node::Directory {
        children: entries
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
    }
}
