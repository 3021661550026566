use std::path::Path;

use kg_io::{DirectionEncoding, ExportOptions};

pub fn run(plan: &Path, output: Option<&Path>, symbolic: bool) -> Result<(), String> {
    let world = super::load_world(plan)?;
    let options = ExportOptions {
        directions: if symbolic {
            DirectionEncoding::Symbolic
        } else {
            DirectionEncoding::Legacy
        },
    };

    if let Some(path) = output {
        kg_io::write_world(&world, &options, path).map_err(|e| e.to_string())?;
        println!(
            "  Exported '{}' to {} ({})",
            world.meta.name,
            path.display(),
            world.stats()
        );
    } else {
        let doc = kg_io::export_world(&world, &options);
        let text =
            serde_json::to_string_pretty(&doc).map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{text}");
    }
    Ok(())
}
