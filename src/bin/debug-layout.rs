/// Diagnostic tool to verify the tree → layout → color pipeline
use std::sync::Arc;

use anyhow::Context;
use treemap_rs::render::colors::AppColor;
use treemap_rs::render::scale::Gradient;
use treemap_rs::tree::aggregate;
use treemap_rs::{parse_nested, ColorSettings, Rect, TreeMap};

const DEFAULT_TREE: &str = "(1, (2, 3, (4, 5), 5))";

/// Parsed command line:
/// `debug-layout [TREE] [WIDTH HEIGHT] [--tree TREE] [--scale] [--seed N | --random]`
#[derive(Debug, PartialEq)]
struct Options {
    tree: Option<String>,
    bounds: Rect,
    use_scale: bool,
    seed: Option<u64>,
}

/// A positional starting with `(` is the tree. Plain numbers are the extent,
/// except that an odd count makes the first one a single-leaf tree.
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut args = args.into_iter();
    let mut tree = None;
    let mut numbers = Vec::new();
    let mut use_scale = false;
    let mut seed = Some(0);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scale" => use_scale = true,
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--random" => seed = None,
            "--tree" => tree = Some(args.next().context("--tree needs a value")?),
            _ if tree.is_none() && arg.trim_start().starts_with('(') => tree = Some(arg),
            _ => {
                arg.parse::<f64>()
                    .with_context(|| format!("unexpected argument '{}'", arg))?;
                numbers.push(arg);
            }
        }
    }

    if tree.is_none() && numbers.len() % 2 == 1 {
        tree = Some(numbers.remove(0));
    }

    let bounds = match numbers.as_slice() {
        [] => Rect::UNIT,
        [w, h] => Rect::new(0.0, 0.0, w.parse()?, h.parse()?),
        _ => anyhow::bail!("expected at most one TREE and one WIDTH HEIGHT pair"),
    };

    Ok(Options {
        tree,
        bounds,
        use_scale,
        seed,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("treemap_rs=debug".parse()?),
        )
        .init();

    let options = parse_args(std::env::args().skip(1))?;
    let bounds = options.bounds;
    let seed = options.seed;
    let use_scale = options.use_scale;

    println!("=== DIAGNOSTIC: Tree → Layout Pipeline ===");
    let text = options.tree.as_deref().unwrap_or(DEFAULT_TREE);
    let root = parse_nested(text)?;
    println!("\n[1] Tree parsed: {}", root);
    println!(
        "    aggregate={} leaves={} min={} max={}",
        root.size(),
        root.leaf_count(),
        root.min_size(),
        root.max_size()
    );

    if let Err(e) = aggregate::find_stale(&root) {
        println!("    WARNING: {}", e);
    }

    let scale: Option<Arc<dyn treemap_rs::render::scale::ColorScale>> = if use_scale {
        Some(Arc::new(Gradient::viridis()))
    } else {
        None
    };
    let map = TreeMap::new(root, ColorSettings { scale, seed });

    let tiles = map.tiles_in(bounds);
    println!(
        "\n[2] Layout computed: {} tiles in {:.1}x{:.1}",
        tiles.len(),
        bounds.w,
        bounds.h
    );
    for (i, tile) in tiles.iter().enumerate() {
        println!(
            "    [{}] size={} depth={} rect: {:.4}x{:.4} at ({:.4}, {:.4}) color={} label={}",
            i,
            tile.size,
            tile.depth,
            tile.rect.w,
            tile.rect.h,
            tile.rect.x,
            tile.rect.y,
            hex(tile.color),
            tile.label.as_deref().unwrap_or("-")
        );
    }

    println!("\n[3] Checking coverage:");
    let covered: f64 = tiles.iter().map(|t| t.rect.area()).sum();
    println!("    Total tile area: {:.6}", covered);
    println!("    Bounds area:     {:.6}", bounds.area());
    if bounds.area() > 0.0 {
        println!("    Coverage: {:.2}%", covered / bounds.area() * 100.0);
    }

    if let Some(legend) = map.legend(5) {
        println!("\n[4] Legend [{} .. {}]:", legend.norm.vmin, legend.norm.vmax);
        for (value, color) in &legend.samples {
            println!("    {:>10.3}  {}", value, hex(*color));
        }
    }

    Ok(())
}

fn hex(c: AppColor) -> String {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", ch(c.r), ch(c.g), ch(c.b))
}
