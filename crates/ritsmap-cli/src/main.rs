use ritsmap::render::raster::{DEFAULT_SCALE, RasterError, RasterOptions};
use ritsmap::render::{HeadlessError, HeadlessRenderer, RenderConfig};
use ritsmap::{DEFAULT_TOOTH_FRACTION, GearSpec, gear_ring_path};
use std::io::Write;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Layout(ritsmap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<ritsmap::Error> for CliError {
    fn from(value: ritsmap::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Render,
    Layout,
    Gear,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct GearArgs {
    radius: Option<f64>,
    teeth: Option<usize>,
    height: Option<f64>,
    fraction: Option<f64>,
    bore: Option<f64>,
    ring_inner: Option<f64>,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    pretty: bool,
    config: Option<String>,
    overrides: Vec<String>,
    render_format: RenderFormat,
    render_scale: Option<f32>,
    background: Option<String>,
    out: Option<String>,
    gear: GearArgs,
}

fn usage() -> &'static str {
    "ritsmap-cli\n\
\n\
USAGE:\n\
  ritsmap-cli layout [--pretty] [--config <json>] [--set key=value]...\n\
  ritsmap-cli render [--format svg|png|jpg|pdf] [--scale <n>] [--background <color>] [--out <path>] [--config <json>] [--set key=value]...\n\
  ritsmap-cli gear --radius <r> --teeth <n> --height <h> [--fraction <f>] [--bore <r>] [--ring-inner <r>]\n\
\n\
NOTES:\n\
  - --config reads a JSON diagram config; --set overrides are applied after it, in order.\n\
  - --set values are parsed as JSON when possible (dots.count=80, arc.showPath=true).\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to ./ritsmap.<ext>; PNG/JPG scale defaults to 4.\n\
  - --ring-inner prints a circle with a toothed inner edge instead of a gear.\n\
  - Set RITSMAP_LOG (e.g. RITSMAP_LOG=debug) to see layout diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a str, CliError> {
    it.next().map(String::as_str).ok_or(CliError::Usage(usage()))
}

fn parse_value<T: FromStr>(raw: &str) -> Result<T, CliError> {
    raw.trim().parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "gear" => args.command = Command::Gear,
            "--pretty" => args.pretty = true,
            "--config" => args.config = Some(next_value(&mut it)?.to_string()),
            "--set" => args.overrides.push(next_value(&mut it)?.to_string()),
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale: f32 = parse_value(next_value(&mut it)?)?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = Some(scale);
            }
            "--background" => {
                let bg = next_value(&mut it)?.trim();
                if !bg.is_empty() {
                    args.background = Some(bg.to_string());
                }
            }
            "--out" => args.out = Some(next_value(&mut it)?.to_string()),
            "--radius" => args.gear.radius = Some(parse_value(next_value(&mut it)?)?),
            "--teeth" => args.gear.teeth = Some(parse_value(next_value(&mut it)?)?),
            "--height" => args.gear.height = Some(parse_value(next_value(&mut it)?)?),
            "--fraction" => args.gear.fraction = Some(parse_value(next_value(&mut it)?)?),
            "--bore" => args.gear.bore = Some(parse_value(next_value(&mut it)?)?),
            "--ring-inner" => args.gear.ring_inner = Some(parse_value(next_value(&mut it)?)?),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.command == Command::Gear {
        let g = &args.gear;
        if g.radius.is_none() || g.teeth.is_none() {
            return Err(CliError::Usage(usage()));
        }
        if g.ring_inner.is_none() && g.height.is_none() {
            return Err(CliError::Usage(usage()));
        }
    }

    Ok(args)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("RITSMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber installed by an embedding process wins.
    let _ = subscriber.try_init();
}

fn load_config(args: &Args) -> Result<RenderConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            RenderConfig::from_json_str(&text).map_err(HeadlessError::from)?
        }
        None => RenderConfig::default(),
    };
    for assignment in &args.overrides {
        config
            .apply_override(assignment)
            .map_err(HeadlessError::from)?;
    }
    tracing::debug!(
        config = args.config.as_deref().unwrap_or("<defaults>"),
        overrides = args.overrides.len(),
        "config loaded"
    );
    Ok(config)
}

fn write_bytes(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        Some(path) => {
            std::fs::write(path, bytes)?;
            tracing::info!(path, bytes = bytes.len(), "wrote output");
        }
    }
    Ok(())
}

fn gear_command(g: &GearArgs) -> Result<String, CliError> {
    let (Some(radius), Some(teeth)) = (g.radius, g.teeth) else {
        return Err(CliError::Usage(usage()));
    };

    if let Some(inner) = g.ring_inner {
        GearSpec::new(radius, teeth, 0.0, DEFAULT_TOOTH_FRACTION)?;
        if !(inner.is_finite() && inner > 0.0 && inner < radius) {
            return Err(ritsmap::Error::InvalidGear {
                message: format!("ring inner radius must be in (0, {radius}), got {inner}"),
            }
            .into());
        }
        return Ok(gear_ring_path(radius, inner, teeth));
    }

    let height = g.height.ok_or(CliError::Usage(usage()))?;
    let fraction = g.fraction.unwrap_or(DEFAULT_TOOTH_FRACTION);
    let mut spec = GearSpec::new(radius, teeth, height, fraction)?;
    if let Some(bore) = g.bore {
        spec = spec.with_bore(bore)?;
    }
    Ok(spec.to_path())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Gear => {
            println!("{}", gear_command(&args.gear)?);
            Ok(())
        }
        Command::Layout => {
            let renderer = HeadlessRenderer::new().with_config(load_config(&args)?);
            let layout = renderer.layout_sync()?;
            let mut stdout = std::io::stdout().lock();
            if args.pretty {
                serde_json::to_writer_pretty(&mut stdout, &layout)?;
            } else {
                serde_json::to_writer(&mut stdout, &layout)?;
            }
            writeln!(stdout)?;
            Ok(())
        }
        Command::Render => {
            let renderer = HeadlessRenderer::new()
                .with_config(load_config(&args)?)
                .with_xml_declaration(args.out.is_some());
            let raster = RasterOptions {
                scale: args.render_scale.unwrap_or(DEFAULT_SCALE),
                background: args
                    .background
                    .clone()
                    .or_else(|| RasterOptions::default().background),
                ..RasterOptions::default()
            };
            let format = args.render_format;
            let bytes = match format {
                RenderFormat::Svg => {
                    let svg = renderer.render_svg_sync()?;
                    return write_bytes(svg.as_bytes(), args.out.as_deref());
                }
                RenderFormat::Png => renderer.render_png_sync(&raster)?,
                RenderFormat::Jpeg => renderer.render_jpeg_sync(&raster)?,
                RenderFormat::Pdf => renderer.render_pdf_sync()?,
            };
            let out = args
                .out
                .clone()
                .unwrap_or_else(|| format!("ritsmap.{}", format.extension()));
            write_bytes(&bytes, Some(&out))
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
