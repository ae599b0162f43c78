use super::RunReport;
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, run: &RunReport<'_>) -> Result<()> {
        let output = run.output;
        let generation = &output.generation;

        println!();
        println!(
            "{} {} ({})",
            "Variant".bold(),
            run.variant.cyan().bold(),
            run.package_name
        );
        println!(
            "  {} resources in the catalog, {} generated files",
            output.catalog.len(),
            generation.files.len()
        );

        if !generation.files.is_empty() {
            let destination = if run.dry_run {
                "(dry run, nothing written)".dimmed().to_string()
            } else {
                run.output_dir.display().to_string().dimmed().to_string()
            };
            println!("  {}", destination);
            for file in &generation.files {
                let mut counts = vec![format!("{} resources", file.resources_accessors)];
                if file.compose_accessors > 0 {
                    counts.push(format!("{} compose", file.compose_accessors));
                }
                println!(
                    "    {} {}",
                    file.relative_path.display(),
                    format!("[{}]", counts.join(", ")).dimmed()
                );
            }
        }

        if !run.sink.pruned.is_empty() {
            println!("  {} stale files removed", run.sink.pruned.len());
        }

        let diagnostics = &output.diagnostics;
        if !diagnostics.is_empty() {
            println!();
            println!("{}", format!("{} warnings:", diagnostics.len()).yellow().bold());
            for skipped in &diagnostics.skipped {
                println!("  {} {}", "skipped".yellow(), skipped);
            }
            for collision in &diagnostics.collisions {
                println!("  {} {}", "collision".yellow(), collision);
            }
        }

        if !generation.errors.is_empty() {
            println!();
            println!(
                "{}",
                format!("{} resource type groups failed:", generation.stats.failed_groups)
                    .red()
                    .bold()
            );
            for error in &generation.errors {
                println!("  {} {}", "error".red().bold(), error);
            }
        }

        println!();
        if generation.is_success() {
            println!(
                "{}",
                format!(
                    "Done: {} resources accessors, {} compose accessors ({} written, {} unchanged)",
                    generation.stats.resources_accessors,
                    generation.stats.compose_accessors,
                    run.sink.written,
                    run.sink.unchanged
                )
                .green()
                .bold()
            );
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
