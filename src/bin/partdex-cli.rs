//! Interactive shell over a part catalog file.
//!
//! Loads the catalog named on the command line (default `partfile.txt`)
//! into an index, then runs a numbered menu for lookups and edits. The
//! catalog is only written back on explicit save or at exit.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use partdex::catalog::{load_catalog, save_catalog};
use partdex::{PartIndex, Record};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("partfile.txt"));

    let mut index = PartIndex::new();
    println!("Loading {} ...", path.display());
    match load_catalog(&path, &mut index) {
        Ok(report) => {
            println!("Loaded {} records ({} lines skipped).", report.loaded, report.skipped)
        }
        Err(e) => println!("Warning: could not load file: {e}"),
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("Menu:");
        println!("1) Search part by ID");
        println!("2) Add new part");
        println!("3) Update part description");
        println!("4) Delete part");
        println!("5) Display next 10 parts (from ID)");
        println!("6) Save to file");
        println!("7) Print stats");
        println!("8) Exit");

        let Some(option) = prompt(&mut lines, "Choose option: ")? else {
            break;
        };

        match option.as_str() {
            "1" => {
                let Some(key) = prompt(&mut lines, "Enter Part ID: ")? else { break };
                match index.search(&key) {
                    Some(record) => println!("{record}"),
                    None => println!("Not found."),
                }
            }
            "2" => {
                let Some(key) = prompt(&mut lines, "New Part ID: ")? else { break };
                let Some(payload) = prompt(&mut lines, "Description: ")? else { break };
                match index.insert(Record::new(key, payload)) {
                    Ok(()) => println!("Inserted."),
                    Err(e) => println!("Insert failed: {e}."),
                }
            }
            "3" => {
                let Some(key) = prompt(&mut lines, "Part ID to update: ")? else { break };
                let Some(old) = index.search(&key) else {
                    println!("Not found.");
                    continue;
                };
                println!("Old: {old}");
                let Some(payload) = prompt(&mut lines, "New description: ")? else { break };
                match index.update(&key, payload) {
                    Ok(()) => println!("Updated."),
                    Err(e) => println!("Update failed: {e}."),
                }
            }
            "4" => {
                let Some(key) = prompt(&mut lines, "Part ID to delete: ")? else { break };
                if !index.contains_key(&key) {
                    println!("Not found.");
                    continue;
                }
                let Some(confirm) = prompt(&mut lines, &format!("Confirm delete {key} (y/N): "))?
                else {
                    break;
                };
                if matches!(confirm.to_lowercase().as_str(), "y" | "yes") {
                    match index.delete(&key) {
                        Ok(()) => println!("Deleted."),
                        Err(e) => println!("Delete failed: {e}."),
                    }
                } else {
                    println!("Cancelled.");
                }
            }
            "5" => {
                let Some(start) = prompt(&mut lines, "Start Part ID: ")? else { break };
                let hits = index.scan_from(&start, 10);
                if hits.is_empty() {
                    println!("No parts at or after '{start}'.");
                }
                for record in hits {
                    println!("{record}");
                }
            }
            "6" => {
                let prompt_text =
                    format!("Save filename (enter for default '{}'): ", path.display());
                let Some(out) = prompt(&mut lines, &prompt_text)? else { break };
                let out = if out.is_empty() { path.clone() } else { PathBuf::from(out) };
                save_to(&out, &index);
            }
            "7" => print_stats(&index),
            "8" => {
                let Some(answer) = prompt(&mut lines, "Save changes before exit? (y/N): ")?
                else {
                    break;
                };
                if matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                    save_to(&path, &index);
                }
                println!("Exiting.");
                break;
            }
            _ => println!("Invalid option."),
        }
    }
    Ok(())
}

/// Print `text`, read one line, return it trimmed. `None` on EOF.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn save_to(path: &Path, index: &PartIndex) {
    match save_catalog(path, index) {
        Ok(written) => println!("Saved {written} records to {}", path.display()),
        Err(e) => println!("Save failed: {e}"),
    }
}

fn print_stats(index: &PartIndex) {
    let stats = index.statistics();
    println!("Records:         {}", index.record_count());
    println!("Leaves:          {}", index.leaf_count());
    println!("Depth:           {}", index.depth());
    println!("Splits:          {}", stats.splits);
    println!("Internal splits: {}", stats.internal_splits);
    println!("Fusions:         {}", stats.fusions);
    println!("Internal fusions: {}", stats.internal_fusions);
}
