//! Scripted walkthrough printed by `shelf-cli demo`.

use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

use shelf_app::{LendingService, LibraryError, UserId};
use shelf_authz::Member;
use shelf_events::{LogSink, MemorySink};
use shelf_import::ImportFormat;

const STOCK_JSON: &str = r#"
[
    {"title": "Dune", "total_copies": 5},
    {"title": "1984", "total_copies": 3},
    {"title": "Hobbit", "total_copies": 2}
]
"#;

const MEMBERS: [(&str, &str); 4] = [
    ("student", "Jan"),
    ("teacher", "Kowalski"),
    ("librarian", "Nowak"),
    ("guest", "Guest"),
];

pub fn run(out: &mut impl Write) -> anyhow::Result<()> {
    let mut library = LendingService::new();

    writeln!(out, "=== Catalog ===")?;
    library.add_book("Dune 1", 3)?;
    library.add_book("1984", 5)?;
    show(out, library.search("Dune 1"))?;
    show(out, library.search("1984"))?;

    writeln!(out, "\n=== Import ===")?;
    let entries = ImportFormat::Json.importer().parse(STOCK_JSON)?;
    library.ingest(entries.into_iter().map(<(String, u32)>::from))?;
    for title in ["1984", "Dune 1", "Hobbit"] {
        show(out, library.search(title))?;
    }

    writeln!(out, "\n=== Roles ===")?;
    for (role, name) in MEMBERS {
        writeln!(out, "{}", Member::new(role, name)?)?;
    }

    writeln!(out, "\n=== Lending ===")?;
    let anna = UserId::new(1);
    let john = UserId::new(2);
    library.add_user(anna, "Anna");
    library.add_user(john, "John");
    show(out, library.borrow(anna, "Dune 1"))?;
    show(out, library.search("Dune 1"))?;
    show(out, library.return_book(anna, "Dune 1"))?;
    show(out, library.return_book(john, "Dune 1"))?;
    show(out, library.borrow(john, "Solaris"))?;

    writeln!(out, "\n=== Notifications ===")?;
    let inboxes = [
        ("Anna", Arc::new(MemorySink::new())),
        ("John", Arc::new(MemorySink::new())),
    ];
    for (_, inbox) in &inboxes {
        library.subscribe("Hobbit", inbox.clone());
    }
    library.subscribe("Hobbit", Arc::new(LogSink::new("front desk")));
    library.add_book("Hobbit", 1)?;
    for (name, inbox) in &inboxes {
        for message in inbox.messages() {
            writeln!(out, "Notification for {name}: {message}")?;
        }
    }

    writeln!(out, "\n=== Listing ===")?;
    for (title, record) in library.catalog().iter() {
        writeln!(
            out,
            "Title: {title}, Available: {}, Total: {}",
            record.available, record.total
        )?;
    }

    Ok(())
}

/// Print either the success value or the refusal; refusals are part of the
/// walkthrough, not failures of it.
fn show<T: Display>(out: &mut impl Write, outcome: Result<T, LibraryError>) -> anyhow::Result<()> {
    match outcome {
        Ok(value) => writeln!(out, "{value}")?,
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}
