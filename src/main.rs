//! Cora CLI - curriculum graph inspection and recommendation

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::Path;

use cora::{
    assign_levels, recommend, CoraError, Curriculum, CurriculumGraph, FixSuggestion,
    GraphSnapshot, MasteredSet, DEFAULT_LIMIT,
};

#[derive(Parser)]
#[command(name = "cora")]
#[command(about = "Cora - curriculum graph recommendation engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a curriculum file (build the graph, check for cycles)
    Validate {
        /// Path to a curriculum .yaml/.json file
        file: String,
    },

    /// Print topic levels (longest prerequisite chain depth)
    Levels {
        /// Path to a curriculum .yaml/.json file
        file: String,
    },

    /// Recommend next topics for a learner
    Recommend {
        /// Path to a curriculum .yaml/.json file
        file: String,

        /// Mastered topic keys (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',')]
        mastered: Vec<String>,

        /// Maximum number of recommendations
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Export the graph as a JSON snapshot
    Graph {
        /// Path to a curriculum .yaml/.json file
        file: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file } => validate_curriculum(&file),
        Commands::Levels { file } => print_levels(&file),
        Commands::Recommend {
            file,
            mastered,
            limit,
        } => recommend_topics(&file, mastered, limit),
        Commands::Graph { file } => export_graph(&file),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_graph(file: &str) -> Result<(Curriculum, CurriculumGraph), CoraError> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(CoraError::CurriculumNotFound {
            path: file.to_string(),
        });
    }
    let text = fs::read_to_string(path)?;
    let curriculum = if path.extension().is_some_and(|ext| ext == "json") {
        Curriculum::from_json(&text)?
    } else {
        Curriculum::from_yaml(&text)?
    };
    let graph = CurriculumGraph::build(curriculum.topics.iter().cloned());
    Ok((curriculum, graph))
}

fn warn_data_quality(curriculum: &Curriculum, graph: &CurriculumGraph) {
    if curriculum.skipped > 0 {
        println!(
            "{} {} record(s) skipped (missing key)",
            "⚠".yellow(),
            curriculum.skipped
        );
    }
    if !graph.placeholders().is_empty() {
        let keys: Vec<&str> = graph.placeholders().iter().map(|k| k.as_ref()).collect();
        println!(
            "{} {} placeholder node(s) synthesized for dangling prerequisites: {}",
            "⚠".yellow(),
            keys.len(),
            keys.join(", ")
        );
    }
}

fn validate_curriculum(file: &str) -> Result<(), CoraError> {
    let (curriculum, graph) = load_graph(file)?;
    graph.ensure_acyclic()?;

    println!("{} Curriculum '{}' is valid", "✓".green(), file);
    println!("  Topics: {}", graph.node_count());
    println!("  Prerequisite edges: {}", graph.edge_count());
    warn_data_quality(&curriculum, &graph);

    Ok(())
}

fn print_levels(file: &str) -> Result<(), CoraError> {
    let (_, mut graph) = load_graph(file)?;
    let levels = assign_levels(&mut graph)?;

    let mut entries: Vec<(&str, u32)> = levels
        .iter()
        .map(|(key, level)| (key.as_ref(), *level))
        .collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    println!("{} Levels for '{}':", "→".cyan(), file);
    for (key, level) in entries {
        let title = graph.node(key).map(|n| n.title.as_str()).unwrap_or("");
        println!("  {:>3}  {}  {}", level, key.bold(), title.dimmed());
    }

    Ok(())
}

fn recommend_topics(file: &str, mastered: Vec<String>, limit: usize) -> Result<(), CoraError> {
    let (_, graph) = load_graph(file)?;
    let mastered: MasteredSet = mastered.into_iter().collect();
    let recommendations = recommend(&graph, &mastered, limit)?;

    if recommendations.is_empty() {
        println!("{} Nothing to recommend", "→".cyan());
        return Ok(());
    }

    println!(
        "{} Recommended next topics ({} mastered):",
        "→".cyan(),
        mastered.len()
    );
    for (i, key) in recommendations.iter().enumerate() {
        let title = graph.node(key).map(|n| n.title.as_str()).unwrap_or("");
        println!("  {}. {}  {}", i + 1, key.bold(), title.dimmed());
    }

    Ok(())
}

fn export_graph(file: &str) -> Result<(), CoraError> {
    let (_, graph) = load_graph(file)?;
    graph.ensure_acyclic()?;
    let snapshot = GraphSnapshot::from_graph(&graph);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
