use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use ybx::common::config::{Config, config_file};
use ybx::common::log;
use ybx::layout_engine as layout;
use ybx::layout_engine::WmOp;
use ybx::sys::yabai::Yabai;
use ybx::ui::{self, TreeStyle};

#[derive(Parser)]
#[command(name = "ybx")]
#[command(about = "BSP tree companion for the yabai window manager")]
struct Cli {
    /// Enable verbose logging
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Space-level queries
    Space {
        #[command(subcommand)]
        space_cmd: SpaceCommands,
    },
    /// Window layout commands
    Window {
        #[command(subcommand)]
        window_cmd: WindowCommands,
    },
}

#[derive(Subcommand)]
enum SpaceCommands {
    /// Reconstruct the BSP tree of a space and print it
    Tree {
        /// Space selector (index, label, or "focused")
        #[arg(long, short, default_value = "focused")]
        space: String,
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Use Nerd Font icons in tree output
        #[arg(long, short = 'N')]
        nerd_font: bool,
        /// Indent JSON output
        #[arg(long)]
        pretty_print: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Tree,
}

#[derive(Subcommand)]
enum WindowCommands {
    /// Fold the window's split siblings into a stack
    Stack {
        /// Window selector (id or "focused")
        #[arg(long, short, default_value = "focused")]
        window: String,
        /// Unroll instead when the window already sits in a stack
        #[arg(long)]
        toggle: bool,
    },
    /// Recreate the window's sibling run along the opposite axis
    SwitchSplit {
        #[arg(long, short, default_value = "focused")]
        window: String,
    },
    /// Grow or shrink the window toward its parent split
    Resize {
        /// Amount to resize by, in points (may be negative)
        increment: i32,
        #[arg(long, short, default_value = "focused")]
        window: String,
    },
    /// Close a window
    Close {
        #[arg(long, short, default_value = "focused")]
        window: String,
        /// Close every other window in the window's space instead
        #[arg(long)]
        except: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::init(cli.verbose);

    let config = Config::load(&config_file())?;
    let yabai = Yabai::new(config.yabai_program.clone());

    match cli.command {
        Commands::Space { space_cmd } => match space_cmd {
            SpaceCommands::Tree {
                space,
                format,
                nerd_font,
                pretty_print,
            } => cmd_tree(&yabai, &config, &space, format, nerd_font, pretty_print),
        },
        Commands::Window { window_cmd } => match window_cmd {
            WindowCommands::Stack { window, toggle } => cmd_stack(&yabai, &window, toggle),
            WindowCommands::SwitchSplit { window } => cmd_switch_split(&yabai, &window),
            WindowCommands::Resize { increment, window } => {
                cmd_resize(&yabai, &window, increment)
            }
            WindowCommands::Close { window, except } => cmd_close(&yabai, &window, except),
        },
    }
}

fn cmd_tree(
    yabai: &Yabai,
    config: &Config,
    space: &str,
    format: OutputFormat,
    nerd_font: bool,
    pretty_print: bool,
) -> anyhow::Result<()> {
    let space_info = yabai.query_space(space)?;
    if !space_info.is_bsp() {
        bail!("space '{space}' is not a bsp space");
    }

    let windows = yabai.query_windows(space)?;
    if windows.is_empty() {
        warn!("no windows in space '{space}'");
        return Ok(());
    }
    let tree = layout::reconstruct_tree(&windows)?;

    match format {
        OutputFormat::Json if pretty_print => {
            println!("{}", serde_json::to_string_pretty(&tree)?)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&tree)?),
        OutputFormat::Tree => print!(
            "{}",
            ui::render(&tree, TreeStyle {
                nerd_font: nerd_font || config.nerd_font,
            })
        ),
    }
    Ok(())
}

fn cmd_stack(yabai: &Yabai, window: &str, toggle: bool) -> anyhow::Result<()> {
    let target = yabai.query_window(window)?;
    let windows = yabai.query_windows("focused")?;
    let tree = layout::reconstruct_tree(&windows)?;
    let location = tree
        .find_window(target.id)
        .with_context(|| format!("window {} not found in the reconstructed tree", target.id))?;

    let ops = if toggle {
        layout::plan_toggle(&location)?
    } else {
        layout::plan_fold(&location)?
    };
    if ops.is_empty() {
        return Ok(());
    }
    yabai.run_plan(&ops)?;
    // Warping shifts yabai's focus around; put it back on the target.
    yabai.execute(&WmOp::Focus { window: target.id })?;
    Ok(())
}

fn cmd_switch_split(yabai: &Yabai, window: &str) -> anyhow::Result<()> {
    let target = yabai.query_window(window)?;
    let windows = yabai.query_windows("focused")?;
    let tree = layout::reconstruct_tree(&windows)?;
    let location = tree
        .find_window(target.id)
        .with_context(|| format!("window {} not found in the reconstructed tree", target.id))?;

    let ops = layout::plan_switch_split(&location)?;
    if ops.is_empty() {
        warn!("no consecutive split siblings to switch");
        return Ok(());
    }
    yabai.run_plan(&ops)?;
    yabai.execute(&WmOp::Focus { window: target.id })?;
    Ok(())
}

fn cmd_resize(yabai: &Yabai, window: &str, increment: i32) -> anyhow::Result<()> {
    let target = yabai.query_window(window)?;
    let windows = yabai.query_windows("focused")?;
    let tree = layout::reconstruct_tree(&windows)?;
    let location = tree
        .find_window(target.id)
        .with_context(|| format!("window {} not found in the reconstructed tree", target.id))?;

    let op = layout::plan_resize(&location, increment)?;
    yabai.execute(&op)?;
    Ok(())
}

fn cmd_close(yabai: &Yabai, window: &str, except: bool) -> anyhow::Result<()> {
    let target = yabai.query_window(window)?;
    if !except {
        return Ok(yabai.close_window(target.id)?);
    }

    let windows = yabai.query_windows(&target.space.to_string())?;
    let others: Vec<u32> = windows.iter().map(|w| w.id).filter(|&id| id != target.id).collect();
    if others.is_empty() {
        warn!("no other windows in space {} to close", target.space);
        return Ok(());
    }
    for id in others {
        // Keep going if one window refuses to close; the rest still should.
        if let Err(err) = yabai.close_window(id) {
            warn!("failed to close window {id}: {err}");
        }
    }
    Ok(())
}
