use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

#[cfg(feature = "tch-backend")]
use tch::Device;

use crate::sampling::SamplingParams;

pub const DEFAULT_MODEL_ID: &str = "LiquidAI/LFM2.5-1.2B-Instruct";
const DEFAULT_PORT: u16 = 8001;

/// Process settings read from the environment.
///
/// Generation itself always runs with [`SamplingParams::default`]; only the
/// RNG seed can be pinned here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub model_id: String,
    pub module_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub seed: Option<u64>,
    pub eos_token_id: Option<u32>,
    #[cfg(feature = "tch-backend")]
    pub device: Device,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            model_id: DEFAULT_MODEL_ID.to_string(),
            module_path: PathBuf::from("models/lfm2_5_instruct.ts"),
            tokenizer_path: PathBuf::from("models/tokenizer.json"),
            seed: None,
            eos_token_id: None,
            #[cfg(feature = "tch-backend")]
            device: Device::Cpu,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("SERVER_ADDR")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.listen_addr);

        let model_id = env::var("MODEL_ID").unwrap_or(defaults.model_id);
        let module_path = env::var("MODEL_MODULE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.module_path);
        let tokenizer_path = env::var("TOKENIZER_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.tokenizer_path);

        let seed = parse_var("SAMPLING_SEED");
        let eos_token_id = parse_var("EOS_TOKEN_ID");

        #[cfg(feature = "tch-backend")]
        let device = {
            let raw = env::var("DEVICE").unwrap_or_else(|_| "cpu".into());
            parse_device(&raw)
        };

        Ok(Self {
            listen_addr,
            model_id,
            module_path,
            tokenizer_path,
            seed,
            eos_token_id,
            #[cfg(feature = "tch-backend")]
            device,
        })
    }

    /// Sampling parameters applied to every blog generation: 700 new tokens,
    /// temperature 0.7, top-p 0.9, sampling on.
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            seed: self.seed,
            ..SamplingParams::default()
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(feature = "tch-backend")]
fn parse_device(raw: &str) -> Device {
    let lower = raw.to_lowercase();
    if lower.starts_with("cuda") {
        let idx = lower
            .split(':')
            .nth(1)
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0);
        if tch::Cuda::is_available() {
            return Device::Cuda(idx);
        }
        tracing::warn!(requested = %raw, "CUDA not available, falling back to CPU");
    }
    Device::Cpu
}
