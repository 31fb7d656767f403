use parking_lot::Mutex;

use crate::{
    error::ServiceError,
    model::{GeneratedText, ModelMetadata, TextGenerationPipeline},
    sampling::SamplingParams,
};

pub enum Reply {
    /// Echo the prompt, then append this completion.
    Echo(&'static str),
    /// Return this text verbatim.
    Raw(&'static str),
    Empty,
    Fail(&'static str),
}

/// Canned pipeline that records what it was asked to generate.
pub struct ScriptedPipeline {
    reply: Reply,
    pub calls: Mutex<Vec<(String, SamplingParams)>>,
}

impl ScriptedPipeline {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl TextGenerationPipeline for ScriptedPipeline {
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<Vec<GeneratedText>, ServiceError> {
        self.calls.lock().push((prompt.to_string(), params.clone()));
        let text = match self.reply {
            Reply::Echo(completion) => format!("{prompt}{completion}"),
            Reply::Raw(text) => text.to_string(),
            Reply::Empty => return Ok(Vec::new()),
            Reply::Fail(msg) => return Err(ServiceError::Inference(msg.to_string())),
        };
        Ok(vec![
            GeneratedText {
                generated_text: text,
            },
            GeneratedText {
                generated_text: "second candidate".to_string(),
            },
        ])
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: "scripted".into(),
            model_id: "test/scripted".into(),
            dtype: "none".into(),
            size_bytes: 42,
            device: "Cpu".into(),
        }
    }
}
