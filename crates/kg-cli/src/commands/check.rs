use std::path::{Path, PathBuf};

use colored::Colorize;

use super::plural;

pub fn run(files: &[PathBuf], plan: Option<&Path>) -> Result<(), String> {
    if files.is_empty() && plan.is_none() {
        return Err("nothing to check: pass room files or --plan".into());
    }

    let mut failed = 0;
    for file in files {
        match kg_io::read_room(file) {
            Ok(room) => {
                let counts = room.counts();
                println!(
                    "  {} {}: {} screen{}, {} door{}, {} item{}",
                    "ok".green(),
                    file.display(),
                    counts.screens,
                    plural(counts.screens),
                    counts.doors,
                    plural(counts.doors),
                    counts.items,
                    plural(counts.items),
                );
            }
            Err(e) => {
                failed += 1;
                println!("  {} {}: {e}", "FAIL".red().bold(), file.display());
            }
        }
    }

    if let Some(plan) = plan {
        let world = super::load_world(plan)?;
        let problems = world.verify();
        for problem in &problems {
            println!("  {} {problem}", "FAIL".red().bold());
        }
        let dangling = world.dangling_links().len();
        if dangling > 0 {
            println!(
                "  {} {dangling} door{} link to removed rooms",
                "warning".yellow(),
                plural(dangling)
            );
        }
        if problems.is_empty() {
            println!(
                "  {} {}: {}",
                "ok".green(),
                plan.display(),
                world.stats()
            );
        } else {
            return Err(format!(
                "world from {} is inconsistent ({} problem{})",
                plan.display(),
                problems.len(),
                plural(problems.len())
            ));
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} room file{} failed validation",
            files.len(),
            plural(files.len())
        ));
    }
    Ok(())
}
