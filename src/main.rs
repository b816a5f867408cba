use clap::Parser;
use sheet_optimizer::render;
use sheet_optimizer::{
    Algorithm, GrainDirection, Heuristic, Options, Piece, SortStrategy, StockDef, StockOrder,
    optimize,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sheet_optimizer",
    about = "2D rectangular cutting stock optimizer"
)]
struct Cli {
    /// Stock sheets as LxW[:count[:price]] (e.g. 2440x1220:5); count defaults to unlimited
    #[arg(long, num_args = 1.., required = true)]
    stock: Vec<String>,

    /// Cut pieces as LxW:qty[:grain] with grain h or v (e.g. 800x600:3 400x300:5:h)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<String>,

    /// Blade kerf width in mm (default: 0)
    #[arg(long, default_value_t = 0)]
    kerf: u32,

    /// Disable piece rotation
    #[arg(long)]
    no_rotate: bool,

    /// Never rotate pieces that declare a grain direction
    #[arg(long)]
    respect_grain: bool,

    /// Algorithm: bottom-left, guillotine, maxrects, or maxrects-best
    #[arg(long, default_value = "bottom-left")]
    algorithm: Algorithm,

    /// MaxRects heuristic: BSSF, BAF, BLSF, BL, CP, or BEST
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Piece ordering: area-desc, short-side, long-side, perimeter, or difference
    #[arg(long, default_value = "area-desc")]
    sort: SortStrategy,

    /// Stock preference: largest-first, smallest-first, or cheapest
    #[arg(long, default_value = "largest-first")]
    stock_order: StockOrder,

    /// Only produce layouts that can be cut with guillotine cuts
    #[arg(long)]
    guillotine_only: bool,

    /// Try every piece ordering and keep the best result
    #[arg(long)]
    multi_pass: bool,

    /// Show ASCII layout of each sheet
    #[arg(long)]
    layout: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_dimensions(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected LxW", s));
    }
    let length = parts[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let width = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    if length == 0 || width == 0 {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok((length, width))
}

fn parse_stock(index: usize, s: &str) -> Result<StockDef, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(format!("invalid stock '{}', expected LxW[:count[:price]]", s));
    }
    let (length, width) = parse_dimensions(parts[0])?;
    let count = match parts.get(1) {
        Some(c) => c
            .parse::<u32>()
            .map_err(|_| format!("invalid count in '{}'", s))?,
        None => u32::MAX,
    };
    let mut def = StockDef::new(format!("stock{}", index + 1), length, width, count);
    if let Some(price) = parts.get(2) {
        def.unit_price = Some(
            price
                .parse::<f64>()
                .map_err(|_| format!("invalid price in '{}'", s))?,
        );
    }
    Ok(def)
}

fn parse_cut(index: usize, s: &str, allow_rotate: bool) -> Result<Piece, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("invalid cut '{}', expected LxW:qty[:grain]", s));
    }
    let (length, width) = parse_dimensions(parts[0])?;
    let qty = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if qty == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let grain = match parts.get(2).map(|g| g.to_ascii_lowercase()) {
        None => GrainDirection::None,
        Some(g) if g == "h" => GrainDirection::Horizontal,
        Some(g) if g == "v" => GrainDirection::Vertical,
        Some(_) => return Err(format!("invalid grain in '{}', expected h or v", s)),
    };
    let mut piece = Piece::new(format!("cut{}", index + 1), length, width, qty);
    piece.can_rotate = allow_rotate;
    piece.grain_direction = grain;
    Ok(piece)
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let stock: Vec<StockDef> = cli
        .stock
        .iter()
        .enumerate()
        .map(|(i, s)| parse_stock(i, s))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| exit_with(e));

    let pieces: Vec<Piece> = cli
        .cuts
        .iter()
        .enumerate()
        .map(|(i, c)| parse_cut(i, c, !cli.no_rotate))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| exit_with(e));

    let options = Options {
        algorithm: cli.algorithm,
        kerf: cli.kerf,
        allow_rotation: !cli.no_rotate,
        guillotine_only: cli.guillotine_only,
        respect_grain_direction: cli.respect_grain,
        heuristic: cli.heuristic,
        sort_strategy: cli.sort,
        multi_pass: cli.multi_pass,
        stock_order: cli.stock_order,
    };

    let result = optimize(&pieces, &stock, &options).unwrap_or_else(|e| exit_with(e));

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => exit_with(e),
        }
        return;
    }

    // Output results
    for (i, sheet) in result.sheets.iter().enumerate() {
        println!(
            "Sheet {} ({} {}x{}, {:.1}% waste):",
            i + 1,
            sheet.stock_id,
            sheet.width,
            sheet.height,
            sheet.waste_percentage
        );
        for p in &sheet.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!("  {} {} @ ({}, {}){}", p.piece_unit_id, p.rect(), p.x, p.y, rot);
        }
        if cli.layout {
            print!("{}", render::render_sheet(sheet));
        }
        println!();
    }

    for group in &result.unplaced_pieces {
        println!(
            "Unplaced: {} {}x{} x{}",
            group.piece_id, group.width, group.height, group.quantity
        );
    }

    println!(
        "Summary: {} sheet{} used, {:.1}% waste, {:.1}% efficiency",
        result.stock_used_count,
        if result.stock_used_count == 1 { "" } else { "s" },
        result.total_waste_percentage,
        result.statistics.efficiency,
    );

    if !result.success {
        std::process::exit(2);
    }
}
