use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use route_planner::{loader, RevisitPolicy, RoutePlanner, SearchOptions};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] loader::LoadError);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Push every node onto the open list at most once
    Single,

    /// Re-parent open nodes whenever a cheaper way is found
    Relax,
}

impl From<Policy> for RevisitPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Single => RevisitPolicy::SingleEnqueue,
            Policy::Relax => RevisitPolicy::Relax,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the graph file
    graph_file: PathBuf,

    /// X coordinate of the start point, 0-100
    start_x: f32,

    /// Y coordinate of the start point, 0-100
    start_y: f32,

    /// X coordinate of the end point, 0-100
    end_x: f32,

    /// Y coordinate of the end point, 0-100
    end_y: f32,

    /// How to treat nodes reached more than once
    #[arg(long, value_enum, default_value_t = Policy::Single)]
    policy: Policy,

    /// Maximum number of node expansions
    #[arg(long, default_value_t = route_planner::DEFAULT_STEP_LIMIT)]
    step_limit: usize,

    /// Build a k-d tree over all nodes before resolving the start and end points
    #[arg(long)]
    index: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::default_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut g = load_graph(&cli.graph_file)?;
    if cli.index {
        g.build_index();
    }

    let options = SearchOptions {
        policy: cli.policy.into(),
        step_limit: cli.step_limit,
    };
    let route = RoutePlanner::new(
        &mut g,
        cli.start_x,
        cli.start_y,
        cli.end_x,
        cli.end_y,
        options,
    )?
    .search()?;

    log::info!(
        "found route with {} nodes, distance {}",
        route.nodes.len(),
        route.distance
    );

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{");
    println!("        \"distance\": {}", route.distance);
    println!("      }},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = route.nodes.iter().peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.x, node.y, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_graph(path: &Path) -> Result<route_planner::Graph, GraphLoadError> {
    loader::read_graph_from_file(path).map_err(|e| GraphLoadError(path.to_path_buf(), e))
}
