use ccusage_graph_core::prelude::*;
use std::env;
use std::fs;

const SAMPLE: &str = r#"{"daily": [
    {"date": "2024-01-01", "totalCost": 5.0, "totalTokens": 1000},
    {"date": "2024-01-02", "totalCost": 25.0, "totalTokens": 2000},
    {"date": "2024-01-03", "totalCost": 12.4, "totalTokens": 1400}
]}"#;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Render a specific ccusage JSON export if one was provided
    let input = if args.len() >= 2 {
        println!("Loading usage data from: {}", args[1]);
        fs::read_to_string(&args[1])?
    } else {
        SAMPLE.to_string()
    };

    let dataset = DataLoader::new().parse_str(&input)?;
    println!("Loaded {} days", dataset.len());

    for kind in [ChartKind::Bar, ChartKind::Line] {
        let options = RenderOptions {
            chart_kind: kind,
            ..RenderOptions::default()
        };
        for line in Report::render(&dataset, &options, &PlainPainter) {
            println!("{}", line);
        }
    }

    Ok(())
}
