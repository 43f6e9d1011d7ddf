//! Example demonstrating the comparison engine without the GUI
//!
//! Run with: cargo run --example compare_demo [original.txt modified.txt] [--html]

use std::path::Path;
use text_compare::diff::{DiffOptions, LineType, compute_diff};
use text_compare::file::{load_text, write_text};
use text_compare::highlight::HighlighterRegistry;
use text_compare::render::{ViewMode, render_html};

const ORIGINAL: &str = "fn greet() {\n    println!(\"hello\");\n}\n\nfn main() {\n    greet();\n}\n";
const MODIFIED: &str =
    "fn greet(name: &str) {\n    println!(\"hello {name}\");\n}\n\nfn main() {\n    greet(\"world\");\n    greet(\"again\");\n}\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let export_html = args.iter().any(|a| a == "--html");
    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let (original, modified) = match paths.as_slice() {
        [a, b] => (load_text(Path::new(a.as_str()))?, load_text(Path::new(b.as_str()))?),
        _ => (ORIGINAL.to_string(), MODIFIED.to_string()),
    };

    let result = compute_diff(&original, &modified, &DiffOptions::default());

    println!("=== Text Compare Demo ===\n");
    for (left, right) in result.original.iter().zip(result.modified.iter()) {
        let marker = match left.line_type {
            LineType::Unchanged => ' ',
            LineType::Modified => '~',
            LineType::Removed => '-',
            LineType::Added => '+',
        };
        let number = |n: Option<usize>| n.map(|n| format!("{:>3}", n)).unwrap_or_else(|| "   ".into());
        println!(
            "{} {:<40} {} {} {}",
            number(left.line_number),
            left.content,
            marker,
            number(right.line_number),
            right.content
        );
    }

    println!(
        "\n+{} additions, -{} deletions, ~{} modifications",
        result.stats.additions, result.stats.deletions, result.stats.modifications
    );

    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&result.stats)?);

    if export_html {
        let registry = HighlighterRegistry::with_defaults();
        let html = render_html(&result, registry.get("rust").as_ref(), ViewMode::SideBySide);
        write_text(Path::new("diff.html"), &html)?;
        println!("\nWrote diff.html");
    }

    Ok(())
}
