//! Canned stories
//!
//! Each story is a list of `(page id, template body)` pairs; the first page
//! is the start page. Use [`crate::write_pages`] to put one on disk.

/// `start.md` asks `color`; both options lead to `room.md`, which compares it
pub const COLOR_STORY: &[(&str, &str)] = &[
    (
        "start.md",
        "{{question(\"Pick a color\", \"color\")}}Welcome.\n\
         {{option(\"color\", \"Red\", \"room.md\", \"red\")}}\n\
         {{option(\"color\", \"Blue\", \"room.md\", \"blue\")}}",
    ),
    (
        "room.md",
        "The room is {{if color == \"red\"}}warm{{else}}cold{{/if}}.",
    ),
];

/// `a.md` links to `b.md` and `c.md`; `b.md` reads an undefined key
pub const BROKEN_STORY: &[(&str, &str)] = &[
    (
        "a.md",
        "{{link(\"To B\", \"b.md\")}} {{link(\"To C\", \"c.md\")}}",
    ),
    ("b.md", "{{torch}} {{link(\"To C\", \"c.md\")}}"),
    ("c.md", "The end."),
];

/// Two questions on different pages, a shared page, and static data
///
/// Needs [`CAVE_CONFIG`]. `vault.md` reads both picks, `hall.md` inherits
/// `door` from it, `plaque.md` reads nothing.
pub const CAVE_STORY: &[(&str, &str)] = &[
    (
        "index.md",
        "# {{title}}\n\
         {{question(\"Which door do you open?\", \"door\")}}\n\
         {{option(\"door\", \"The red door\", \"hall.md\", \"red\")}}\n\
         {{option(\"door\", \"The blue door\", \"hall.md\", \"blue\")}}",
    ),
    (
        "hall.md",
        "A long hall.\n\
         {{question(\"Take a weapon?\", \"weapon\")}}\n\
         {{option(\"weapon\", \"Sword\", \"vault.md\", \"sword\")}}\n\
         {{option(\"weapon\", \"Bow\", \"vault.md\", \"bow\")}}\n\
         {{link(\"Read the plaque\", \"plaque.md\")}}",
    ),
    (
        "vault.md",
        "{{if door == \"red\"}}Embers glow behind you.{{else}}Water drips behind you.{{/if}}\n\
         {{if weapon == \"sword\"}}You raise the {{weapon.label}}.{{else}}You nock an arrow.{{/if}}",
    ),
    ("plaque.md", "It reads: {{motto}}"),
];

pub const CAVE_CONFIG: &str = r#"
[data]
title = "The Cave"
motto = "Fortune favours the curious"
"#;
