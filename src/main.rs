//! Venue Designer (Headless).
//!
//! Kommandozeilen-Werkzeug rund um den Venue-Szenen-Editor:
//! Grundrisse als `.glb` exportieren und gespeicherte Szenen prüfen.

use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use venue_scene_editor::floorplan::build_model;
use venue_scene_editor::{EditorOptions, Floorplan, SceneDocument};

const USAGE: &str = "\
Verwendung:
  venue-designer export-floorplan <plan.json> <out.glb> [--height <m>]
  venue-designer inspect-scene <scene.json>";

fn main() -> anyhow::Result<()> {
    AppRunner::run(std::env::args().skip(1).collect())
}

/// Ausgewählter Unterbefehl
#[derive(Debug, PartialEq)]
enum CliCommand {
    ExportFloorplan {
        plan: PathBuf,
        out: PathBuf,
        height: Option<f32>,
    },
    InspectScene {
        scene: PathBuf,
    },
}

struct AppRunner;

impl AppRunner {
    fn run(args: Vec<String>) -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Venue Designer v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = EditorOptions::load_from_file(&EditorOptions::config_path());

        match parse_args(&args)? {
            CliCommand::ExportFloorplan { plan, out, height } => {
                export_floorplan(&plan, &out, height.unwrap_or(options.wall_height), &options)
            }
            CliCommand::InspectScene { scene } => inspect_scene(&scene),
        }
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<CliCommand> {
    let Some((command, rest)) = args.split_first() else {
        bail!("Kein Befehl angegeben\n{USAGE}");
    };
    match command.as_str() {
        "export-floorplan" => {
            let mut positional = Vec::new();
            let mut height = None;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                if arg == "--height" {
                    let value = iter.next().context("--height erwartet einen Wert")?;
                    let parsed: f32 = value
                        .parse()
                        .with_context(|| format!("Ungültige Höhe: {value}"))?;
                    if !parsed.is_finite() || parsed <= 0.0 {
                        bail!("Höhe muss positiv sein: {value}");
                    }
                    height = Some(parsed);
                } else {
                    positional.push(PathBuf::from(arg));
                }
            }
            let [plan, out]: [PathBuf; 2] = positional.try_into().map_err(|_| {
                anyhow::anyhow!("export-floorplan erwartet <plan.json> <out.glb>\n{USAGE}")
            })?;
            Ok(CliCommand::ExportFloorplan { plan, out, height })
        }
        "inspect-scene" => match rest {
            [scene] => Ok(CliCommand::InspectScene {
                scene: PathBuf::from(scene),
            }),
            _ => bail!("inspect-scene erwartet <scene.json>\n{USAGE}"),
        },
        other => bail!("Unbekannter Befehl: {other}\n{USAGE}"),
    }
}

fn export_floorplan(
    plan_path: &Path,
    out_path: &Path,
    height: f32,
    options: &EditorOptions,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(plan_path)
        .with_context(|| format!("Grundriss nicht lesbar: {}", plan_path.display()))?;
    let plan = Floorplan::from_json(&json)?;
    let asset = build_model(&plan, height, options.wall_thickness)?;

    std::fs::write(out_path, &asset.glb)
        .with_context(|| format!("Modell nicht schreibbar: {}", out_path.display()))?;
    let metadata_path = out_path.with_extension("json");
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&asset.metadata)?)?;

    log::info!(
        "Modell geschrieben: {} ({} Bytes), Metadaten: {}",
        out_path.display(),
        asset.glb.len(),
        metadata_path.display()
    );
    Ok(())
}

fn inspect_scene(scene_path: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(scene_path)
        .with_context(|| format!("Szene nicht lesbar: {}", scene_path.display()))?;
    let document = SceneDocument::from_json(&json)?;
    let project = document.project_id.clone().unwrap_or_else(|| "-".into());
    let (registry, healed) = document.into_registry();

    let mut per_kind: BTreeMap<String, usize> = BTreeMap::new();
    for element in registry.iter() {
        *per_kind.entry(format!("{:?}", element.kind)).or_default() += 1;
    }
    let stacked = registry.iter().filter(|e| e.parent_id.is_some()).count();
    let locked = registry.iter().filter(|e| e.locked).count();
    let tagged = registry.iter().filter(|e| e.service_tag.is_some()).count();

    println!("Projekt:    {project}");
    println!("Elemente:   {}", registry.len());
    for (kind, count) in &per_kind {
        println!("  {kind:<12} {count}");
    }
    println!("Gestapelt:  {stacked}");
    println!("Gesperrt:   {locked}");
    println!("Getaggt:    {tagged}");
    for error in &healed {
        log::warn!("Geheilt: {}", error);
    }
    if !healed.is_empty() {
        println!("Geheilte Referenzen: {}", healed.len());
    }
    Ok(())
}
