//! Runs one generation: compose, call the provider, clean up the output.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::fence::strip_code_fence;
use crate::llm::{GenerateError, Generator};
use crate::model::ParsedData;
use crate::prompt::PromptComposer;
use crate::{Error, Result};

pub struct GenerationInvoker {
    composer: PromptComposer,
    generator: Arc<dyn Generator>,
}

impl GenerationInvoker {
    pub fn new(composer: PromptComposer, generator: Arc<dyn Generator>) -> Self {
        Self {
            composer,
            generator,
        }
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Generate code for `data`.
    ///
    /// A missing or blank credential fails with [`Error::MissingCredential`]
    /// before anything is sent. A rejected credential fails with
    /// [`Error::Auth`] so the caller can erase it; every other provider failure
    /// becomes [`Error::Generation`]. The call is made once, without retries.
    pub async fn invoke(
        &self,
        data: &ParsedData,
        credential: Option<&str>,
        date: NaiveDate,
    ) -> Result<String> {
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(Error::MissingCredential)?;

        let prompt = self.composer.compose(data, date)?;
        log::info!(
            "generating {} code for {} {} via {}",
            self.composer.target(),
            data.method,
            data.url,
            self.generator.name()
        );

        match self.generator.generate(&prompt, credential).await {
            Ok(text) => {
                log::info!("generation finished ({} bytes)", text.len());
                Ok(strip_code_fence(&text))
            }
            Err(GenerateError::Auth(msg)) => {
                log::warn!("credential rejected by {}", self.generator.name());
                Err(Error::Auth(msg))
            }
            Err(err) => Err(Error::generation(err.to_string())),
        }
    }
}
