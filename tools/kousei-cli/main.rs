use clap::Parser;
use kousei::prelude::*;
use std::fs;
use std::io::{self, Write};

/// A workflow graph inspection and validation CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow interchange JSON file
    workflow_path: Option<String>,

    /// Write the normalized workflow JSON back to this path
    #[arg(short, long)]
    normalize: Option<String>,

    /// Print the staged execution request instead of the summary
    #[arg(short, long)]
    request: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    let workflow_path = if cli.human {
        prompt_for_input("Enter workflow JSON path", Some("data/workflow.json"))
    } else {
        cli.workflow_path
            .unwrap_or_else(|| exit_with_error("Workflow path is required in non-interactive mode."))
    };

    let text = fs::read_to_string(&workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &workflow_path, e
        ))
    });

    let mut store = WorkflowStore::in_memory();
    store
        .import_from_json(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Workflow rejected: {}", e)));

    let snapshot = store.snapshot();

    if cli.request {
        let request = ExecutionRequest::from_snapshot(&snapshot)
            .unwrap_or_else(|e| exit_with_error(&format!("Cannot stage execution: {}", e)));
        println!("{}", request.to_json());
        return;
    }

    println!("Workflow '{}' is structurally valid.", workflow_path);
    println!("\n--- Layer Summary ---");
    for kind in NodeKind::ALL {
        let count = snapshot.nodes.iter().filter(|n| n.kind == kind).count();
        let policy = layer_policy(kind);
        println!(
            "{:<12} {:>2} node(s)   (allowed {}..{})",
            kind.to_string(),
            count,
            policy.min_count,
            policy.max_count
        );
    }

    println!("\n--- Connection Audit ---");
    let mut rejected = 0;
    for edge in &snapshot.edges {
        let verdict = check_reconnection(
            &edge.source,
            &edge.target,
            &snapshot.nodes,
            &snapshot.edges,
            &edge.id,
        );
        match verdict.reason() {
            None => println!("ok      {} -> {}", edge.source, edge.target),
            Some(reason) => {
                rejected += 1;
                println!("REJECT  {} -> {}: {}", edge.source, edge.target, reason);
            }
        }
    }
    if rejected == 0 {
        println!("All {} connection(s) pass the topology rules.", snapshot.edges.len());
    } else {
        println!("{} connection(s) violate the topology rules.", rejected);
    }

    if let Some(out_path) = cli.normalize {
        fs::write(&out_path, store.export_to_json()).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write '{}': {}", out_path, e))
        });
        println!("\nNormalized workflow written to '{}'.", out_path);
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
