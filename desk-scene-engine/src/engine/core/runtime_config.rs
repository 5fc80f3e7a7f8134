use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
use constants::overlay::{EMBEDDED_DEV_DOCUMENT_URL, EMBEDDED_DOCUMENT_URL};

/// Flags that change behaviour without a rebuild.
///
/// In the browser they come from the page query string (`?dev&debug`),
/// natively from the command line (`--dev --debug`).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Embed the local development server instead of the published document.
    pub dev_surface: bool,
    /// Log every frame rate sample together with the current tier.
    pub debug: bool,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug, Clone)]
#[command(name = "desk-scene-engine")]
#[command(version, about = "Desk scene with an embedded monitor document", long_about = None)]
struct Args {
    /// Embed the local development server on the monitor
    #[arg(long)]
    dev: bool,

    /// Log frame rate and quality tier every sample
    #[arg(long)]
    debug: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<Args> for RuntimeConfig {
    fn from(args: Args) -> Self {
        Self {
            dev_surface: args.dev,
            debug: args.debug,
        }
    }
}

impl RuntimeConfig {
    pub fn from_environment() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let search = web_sys::window().and_then(|window| window.location().search().ok());
            match search.map(|search| Self::from_query(&search)) {
                Some(Ok(config)) => config,
                Some(Err(err)) => {
                    warn!("Ignoring page query: {:?}", err);
                    Self::default()
                }
                None => Self::default(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Args::parse().into()
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_query(search: &str) -> Result<Self, wasm_bindgen::JsValue> {
        let params = web_sys::UrlSearchParams::new_with_str(search)?;
        Ok(Self {
            dev_surface: params.has("dev"),
            debug: params.has("debug"),
        })
    }

    /// Parses a full argument list, program name first.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Args::try_parse_from(args).map(Self::from)
    }

    pub fn embedded_document_url(&self) -> &'static str {
        if self.dev_surface {
            EMBEDDED_DEV_DOCUMENT_URL
        } else {
            EMBEDDED_DOCUMENT_URL
        }
    }
}
