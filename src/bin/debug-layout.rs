/// Diagnostic tool to verify the loader → tree → layout pipeline without a frontend
///
/// Usage:
///   debug-layout <path>
///   debug-layout --population <populations.json> <regions.json>
use std::path::PathBuf;

use anyhow::{bail, Context};
use silvamap_rs::app::DisplayConfig;
use silvamap_rs::layout::{compute_layout, locate};
use silvamap_rs::scanner::{self, population};
use silvamap_rs::tree::{Domain, Tree};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("silvamap_rs=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, populations, regions] if flag == "--population" => {
            let populations = std::fs::read_to_string(populations)
                .with_context(|| format!("reading {}", populations))?;
            let regions =
                std::fs::read_to_string(regions).with_context(|| format!("reading {}", regions))?;
            let tree = population::load_population_tree(&populations, &regions)?;
            report(&tree)
        }
        [path] => {
            let path = PathBuf::from(path);
            println!("Scanning: {}", path.display());
            let tree = scanner::load_file_tree(&path)?;
            report(&tree)
        }
        _ => bail!(
            "usage: debug-layout <path> | debug-layout --population <populations.json> <regions.json>\n\
             population data: {}\n\
             region data:     {}",
            population::WORLD_BANK_POPULATIONS,
            population::WORLD_BANK_REGIONS
        ),
    }
}

fn report<D: Domain>(tree: &Tree<D>) -> anyhow::Result<()> {
    let root = tree.root();
    println!("\n[1] Tree: {} nodes", tree.len());
    println!(
        "    Root: '{}' ({})",
        tree.path_label(root),
        D::describe_weight(tree.total_weight(root))
    );

    tree.check_invariants().context("tree invariants")?;
    println!("    Invariants hold");

    println!("\n[2] Top 10 children of root:");
    let mut children: Vec<_> = tree.children(root).collect();
    children.sort_by_key(|&id| std::cmp::Reverse(tree.total_weight(id)));
    for (i, &child) in children.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - {} ({} children)",
            i,
            tree.name(child).map(|n| n.to_string()).unwrap_or_default(),
            D::describe_weight(tree.total_weight(child)),
            tree.child_count(child)
        );
    }

    let config = DisplayConfig::default();
    let rect = config.treemap_rect();
    let layout = compute_layout(tree, root, rect);
    println!(
        "\n[3] Layout in {}x{}: {} rectangles",
        rect.w,
        rect.h,
        layout.len()
    );

    println!("\n[4] Top 10 largest rectangles by area:");
    let mut sorted = layout.rects.clone();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.rect.area()));
    for (i, placed) in sorted.iter().take(10).enumerate() {
        let r = placed.rect;
        println!(
            "    [{}] {} - {}x{} at ({}, {}) colour {}",
            i,
            tree.path_label(placed.node),
            r.w,
            r.h,
            r.x,
            r.y,
            placed.colour
        );
    }

    let covered: u64 = layout.rects.iter().map(|r| r.rect.area()).sum();
    println!("\n[5] Coverage: {} of {} px²", covered, rect.area());

    let (cx, cy) = ((rect.w / 2) as i32, (rect.h / 2) as i32);
    match locate(tree, root, rect, cx, cy) {
        Some(hit) => println!(
            "\n[6] Centre ({}, {}) -> {} ({})",
            cx,
            cy,
            hit.path,
            D::describe_weight(tree.total_weight(hit.node))
        ),
        None => println!("\n[6] Centre ({}, {}) -> nothing", cx, cy),
    }

    Ok(())
}
