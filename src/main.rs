use argh::FromArgs;
use std::path::PathBuf;
use temperature_heatmap::{ChartConfig, Heatmap, OutputFormat};

#[derive(FromArgs, Debug)]
/// Render global monthly temperature anomalies as a calendar heatmap
struct Args {
    /// path to a YAML configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// dataset URL, overrides the configured endpoint
    #[argh(option, short = 'e')]
    endpoint: Option<String>,

    /// read the dataset from this JSON file instead of fetching it
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// file to write (default: heatmap.html)
    #[argh(option, short = 'o', default = "PathBuf::from(\"heatmap.html\")")]
    output: PathBuf,

    /// output format: html, svg or json (default: html)
    #[argh(option, short = 'f', default = "OutputFormat::Html")]
    format: OutputFormat,

    /// chart width in px
    #[argh(option)]
    width: Option<u32>,

    /// chart height in px
    #[argh(option)]
    height: Option<u32>,

    /// padding around the plot area in px
    #[argh(option)]
    padding: Option<u32>,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    log_level: String,
}

impl Args {
    fn apply_overrides(&self, config: &mut ChartConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
    }
}

#[tokio::main]
async fn main() {
    let args: Args = argh::from_env();

    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::init_from_env(env);

    let mut config = match &args.config {
        Some(path) => match ChartConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load config from '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ChartConfig::default(),
    };
    args.apply_overrides(&mut config);

    let heatmap = match Heatmap::new(config) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = heatmap
        .generate()
        .output(&args.output)
        .maybe_input(args.input.as_deref())
        .format(args.format)
        .call()
        .await;

    match result {
        Ok(data) => log::info!(
            "Rendered {} monthly records to {}",
            data.len(),
            args.output.display()
        ),
        Err(e) => {
            log::error!("Failed to render heatmap: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
