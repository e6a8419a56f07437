use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::generate::compose::ComposeOutcome;
use crate::generate::{ComposeReport, GeneratedConfigs};
use crate::models::{BuildTool, Detection, Scope, ScopedClasspath};

/// Render the result of `sutgen detect`.
pub fn render_detection(detection: &Detection, quiet: bool) {
    if quiet {
        println!("{}", detection.build_tool);
        return;
    }

    println!("\n {} v{}", "sutgen".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Project: {}\n", detection.project.display());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Build tool").add_attribute(Attribute::Bold),
            Cell::new("Marker").add_attribute(Attribute::Bold),
            Cell::new("Dependency directory").add_attribute(Attribute::Bold),
        ]);

    let tool_color = match detection.build_tool {
        BuildTool::Unsupported => Color::Red,
        _ => Color::Green,
    };
    let deps_cell = match &detection.deps_dir {
        Some(dir) if detection.deps_dir_exists => Cell::new(dir.display().to_string()),
        Some(dir) => Cell::new(format!("{} (missing)", dir.display())).fg(Color::Yellow),
        None => Cell::new("set DEPS_DIR manually").fg(Color::Red),
    };

    table.add_row(vec![
        Cell::new(detection.build_tool.to_string()).fg(tool_color),
        Cell::new(detection.marker.as_deref().unwrap_or("-")),
        deps_cell,
    ]);

    println!("{}", table);
}

/// Print classpaths under the section headers downstream scripts grep for.
pub fn render_classpaths(classpaths: &[ScopedClasspath], verbose: bool) {
    for (i, cp) in classpaths.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", section_header(cp.scope));
        println!("{}", cp.classpath);

        if verbose {
            eprintln!(
                " {} {} entries",
                "→".cyan(),
                cp.entry_count()
            );
            for entry in cp.classpath.split(':').filter(|e| !e.is_empty()) {
                eprintln!("   {}", entry.dimmed());
            }
        }
    }
}

fn section_header(scope: Scope) -> &'static str {
    match scope {
        Scope::Runtime => "=== RUNTIME DEPENDENCIES ===",
        Scope::Test => "=== TEST DEPENDENCIES ===",
    }
}

pub fn render_compose(report: &ComposeReport, label: &str) {
    match (&report.outcome, &report.mount) {
        (ComposeOutcome::Written, Some((host, container))) => {
            println!("{} {}", "Generated".green(), report.path.display());
            println!("  Host {} dir: {}", label, host);
            println!("  Container mount: {}", container);
        }
        (ComposeOutcome::Removed, _) => {
            println!(
                "{} {} (no {} mount configured)",
                "Removed".yellow(),
                report.path.display(),
                label
            );
        }
        _ => {
            println!("No {} mount configured; nothing to generate", label);
        }
    }
}

pub fn render_generated(configs: &GeneratedConfigs) {
    println!("{}", "[OK] Generated:".green().bold());
    println!("  - {}", configs.pathcov.display());
    println!("  - {}", configs.jdart.display());
    match &configs.deps_classpath {
        Some(cp) => println!(
            "  {} dependency entries",
            cp.split(':').filter(|e| !e.is_empty()).count()
        ),
        None => println!("  no dependencies"),
    }
}
