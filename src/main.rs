// SPDX-License-Identifier: MPL-2.0
use photo_cropper::application::port::ImageRef;
use photo_cropper::application::{CropOrchestrator, CropSession};
use photo_cropper::config::{self, CropConfig};
use photo_cropper::infrastructure::{ImageRsMetadataProvider, ImageRsTransformer};
use photo_cropper::replay::GestureScript;
use photo_cropper::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "\
Usage: photo_cropper <image> [options]

Options:
  --gestures <file>   TOML touch script to replay before cropping
  --config <file>     settings file (defaults to the user config)
  --out-dir <dir>     where the cropped JPEG is written
  --flip              mirror the image horizontally
  -h, --help          print this help
";

struct Args {
    image: PathBuf,
    gestures: Option<PathBuf>,
    config: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    flip: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let to_config_error = |e: pico_args::Error| Error::Config(e.to_string());
    let gestures = args
        .opt_value_from_os_str("--gestures", |s| Ok::<_, String>(PathBuf::from(s)))
        .map_err(to_config_error)?;
    let config = args
        .opt_value_from_os_str("--config", |s| Ok::<_, String>(PathBuf::from(s)))
        .map_err(to_config_error)?;
    let out_dir = args
        .opt_value_from_os_str("--out-dir", |s| Ok::<_, String>(PathBuf::from(s)))
        .map_err(to_config_error)?;
    let flip = args.contains("--flip");
    let image = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config("missing <image> argument".to_string()))?;

    Ok(Some(Args {
        image,
        gestures,
        config,
        out_dir,
        flip,
    }))
}

fn load_config(path: Option<&PathBuf>) -> Result<CropConfig> {
    match path {
        Some(path) => config::load_from_path(path),
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                log::warn!("{warning}");
            }
            Ok(config)
        }
    }
}

async fn run(args: Args) -> Result<ImageRef> {
    let mut config = load_config(args.config.as_ref())?;
    if args.out_dir.is_some() {
        config.output.output_dir = args.out_dir;
    }

    let mut session = CropSession::open(ImageRef::new(args.image), &ImageRsMetadataProvider, &config)?;
    if let Some(path) = args.gestures {
        GestureScript::load(&path)?.replay(&mut session);
    }
    if args.flip {
        session.toggle_flip();
    }

    let transformer = ImageRsTransformer::new(config.output_dir(), config.jpeg_quality());
    let orchestrator = CropOrchestrator::new(Arc::new(transformer));
    session.commit(&orchestrator).await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("photo_cropper: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("photo_cropper: {err}");
            ExitCode::FAILURE
        }
    }
}
