use std::{fs, path::Path, time::Instant};

use parking_lot::Mutex;
use tch::{Device, IValue, Tensor, no_grad};
use tokenizers::Tokenizer;
use tracing::debug;

use crate::{
    config::AppConfig,
    error::ServiceError,
    model::{GeneratedText, ModelMetadata, TextGenerationPipeline},
    sampling::{Sampler, SamplingParams},
};

const EOS_CANDIDATES: [&str; 3] = ["<|im_end|>", "<|endoftext|>", "</s>"];

/// TorchScript causal LM driven token by token.
pub struct TorchPipeline {
    model_id: String,
    size_bytes: u64,
    device: Device,
    eos_token_id: Option<u32>,
    tokenizer: Tokenizer,
    module: Mutex<tch::CModule>,
}

impl TorchPipeline {
    pub fn load(config: &AppConfig) -> Result<Self, ServiceError> {
        let tokenizer = Tokenizer::from_file(config.tokenizer_path.as_path())
            .map_err(|e| ServiceError::Tokenizer(e.to_string()))?;

        let eos_token_id = config.eos_token_id.or_else(|| {
            EOS_CANDIDATES
                .iter()
                .find_map(|token| tokenizer.token_to_id(token))
        });

        let (module, size_bytes) = load_module(&config.module_path, config.device)?;

        tracing::info!(
            model = %config.model_id,
            size_bytes,
            ?eos_token_id,
            "TorchScript module loaded"
        );

        Ok(Self {
            model_id: config.model_id.clone(),
            size_bytes,
            device: config.device,
            eos_token_id,
            tokenizer,
            module: Mutex::new(module),
        })
    }

    fn next_logits(
        &self,
        module: &tch::CModule,
        input_ids: &[i64],
    ) -> Result<Vec<f32>, ServiceError> {
        let input_tensor = Tensor::from_slice(input_ids)
            .reshape([1, input_ids.len() as i64])
            .to(self.device);

        let output = module
            .forward_is(&[IValue::Tensor(input_tensor)])
            .map_err(|e| ServiceError::Inference(e.to_string()))?;

        // Traced models return either bare logits or (logits, past, ...)
        let logits = match output {
            IValue::Tensor(t) => t,
            IValue::Tuple(ref tuple) if !tuple.is_empty() => match &tuple[0] {
                IValue::Tensor(t) => t.shallow_clone(),
                _ => {
                    return Err(ServiceError::Inference(
                        "expected tensor as first tuple element".into(),
                    ));
                }
            },
            _ => {
                return Err(ServiceError::Inference(
                    "unexpected model output format".into(),
                ));
            }
        };

        // [1, seq_len, vocab] -> [vocab]
        let last = logits
            .select(1, -1)
            .squeeze()
            .to_kind(tch::Kind::Float)
            .to(Device::Cpu);
        Vec::<f32>::try_from(&last).map_err(|e| ServiceError::Inference(e.to_string()))
    }
}

impl TextGenerationPipeline for TorchPipeline {
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<Vec<GeneratedText>, ServiceError> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| ServiceError::Tokenizer(e.to_string()))?;
        let mut input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        if input_ids.is_empty() {
            input_ids.push(0);
        }
        let prompt_token_len = input_ids.len();

        let mut sampler = Sampler::new(params);
        let start = Instant::now();

        no_grad(|| {
            let module = self.module.lock();
            for _ in 0..params.max_new_tokens {
                let logits = self.next_logits(&module, &input_ids)?;
                let next = sampler.sample(&logits) as u32;
                if Some(next) == self.eos_token_id {
                    break;
                }
                input_ids.push(next as i64);
            }
            Ok::<(), ServiceError>(())
        })?;

        let generated_ids: Vec<u32> = input_ids[prompt_token_len..]
            .iter()
            .map(|&id| id as u32)
            .collect();
        let completion = self
            .tokenizer
            .decode(&generated_ids, true)
            .map_err(|e| ServiceError::Tokenizer(e.to_string()))?;

        debug!(
            prompt_tokens = prompt_token_len,
            new_tokens = generated_ids.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation finished"
        );

        Ok(vec![GeneratedText {
            generated_text: format!("{prompt}{completion}"),
        }])
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: "torchscript".to_string(),
            model_id: self.model_id.clone(),
            dtype: "float32".to_string(),
            size_bytes: self.size_bytes,
            device: format!("{:?}", self.device),
        }
    }
}

fn load_module(module_path: &Path, device: Device) -> Result<(tch::CModule, u64), ServiceError> {
    if !module_path.exists() {
        return Err(ServiceError::Other(format!(
            "model artifact missing: {}",
            module_path.display()
        )));
    }
    let size_bytes = fs::metadata(module_path)?.len();
    let mut module = tch::CModule::load_on_device(module_path, device)
        .map_err(|e| ServiceError::Inference(e.to_string()))?;
    module.set_eval();
    Ok((module, size_bytes))
}
