//! Pack directories of PNG images into sprite sheets.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use anyhow::Result;

use atlaspack::{constants, descriptor, packer, sheet_io};

/// Scan directories for .png files and pack them into texture atlas sheets
#[derive(Parser, Debug)]
#[command(name = "packsprites", disable_help_flag = true)]
struct Args {
    /// Print help
    #[arg(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Border around each packed sprite, in pixels
    #[arg(short = 'b', value_name = "PIXELS", default_value_t = constants::DEFAULT_BORDER)]
    border: u32,

    /// Sheet width, in pixels
    #[arg(short = 'w', value_name = "PIXELS", default_value_t = constants::DEFAULT_SHEET_WIDTH)]
    width: u32,

    /// Sheet height, in pixels
    #[arg(short = 'h', value_name = "PIXELS", default_value_t = constants::DEFAULT_SHEET_HEIGHT)]
    height: u32,

    /// Directory the sheet images are written to
    #[arg(short = 't', value_name = "DIR", default_value = constants::DEFAULT_TEXTURE_DIR)]
    texture_dir: String,

    /// Base name for the descriptor and sheet image files
    sheet_name: String,

    /// Directories to scan for .png sprites
    #[arg(required = true)]
    sprite_dirs: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("packsprites: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut sprites = Vec::new();
    for dir in &args.sprite_dirs {
        sprites.extend(sheet_io::load_sprite_dir(dir)?);
    }
    log::info!("collected {} sprites", sprites.len());

    let sheets = packer::pack(&sprites, args.width, args.height, args.border)?;

    let texture_paths = sheet_io::save_sheets(&sheets, &args.sheet_name, &args.texture_dir)?;

    let descriptor_path = format!("{}.spr", args.sheet_name);
    descriptor::write_descriptor(Path::new(&descriptor_path), &texture_paths, &sprites, &sheets)?;

    Ok(())
}
