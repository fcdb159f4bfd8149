use std::sync::Arc;

use log::{debug, info};

use crate::error::ForecastError;
use crate::llm::CompletionModel;
use crate::models::forecast::ForecastResult;
use crate::output_parser;
use crate::prompt::{PromptError, PromptTemplate};

pub const FORECAST_TEMPLATE: &str = "What is the weather in {location}?";

/// Asks a completion model about the weather and decodes its answer.
pub struct Forecaster {
    model: Arc<dyn CompletionModel>,
    template: PromptTemplate,
    format_instructions: String,
}

impl Forecaster {
    pub fn new(model: Arc<dyn CompletionModel>) -> Result<Forecaster, PromptError> {
        let template = PromptTemplate::new(FORECAST_TEMPLATE)?;
        debug!("Forecast prompt takes {:?}", template.input_variables());
        Ok(Forecaster {
            model,
            template,
            format_instructions: output_parser::format_instructions::<ForecastResult>()?,
        })
    }

    pub fn render_prompt(&self, location: &str) -> Result<String, PromptError> {
        let question = self.template.format(&[("location", location)])?;
        Ok(format!("{question}\n\n{}", self.format_instructions))
    }

    pub async fn forecast(&self, location: &str) -> Result<ForecastResult, ForecastError> {
        info!("Forecasting weather for {location}");
        let prompt = self.render_prompt(location)?;
        debug!("Prompt: {prompt}");
        let completion = self.model.complete(&prompt).await?;
        debug!("Completion: {completion}");
        Ok(output_parser::parse(&completion)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::llm::CompletionError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoModel {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionModel for EchoModel {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.prompts
                .lock()
                .expect("lock should not be poisoned")
                .push(prompt.to_string());
            Ok(self.answer.clone())
        }
    }

    fn echo(answer: &str) -> Arc<EchoModel> {
        Arc::new(EchoModel {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn prompt_starts_with_question_and_ends_with_instructions() {
        let forecaster = Forecaster::new(echo("")).unwrap();
        let prompt = forecaster.render_prompt("Paris").unwrap();
        assert!(prompt.starts_with("What is the weather in Paris?\n\n"));
        assert!(prompt.contains("\"temperature\""));
        assert!(prompt.trim_end().ends_with("```"));
    }

    #[tokio::test]
    async fn forecast_sends_prompt_and_parses_answer() {
        let model = echo(r#"{"temperature": 18, "weather": "Cloudy"}"#);
        let forecaster = Forecaster::new(model.clone()).unwrap();

        let result = forecaster.forecast("Paris").await.unwrap();

        assert_eq!(
            result,
            ForecastResult {
                temperature: 18.0,
                weather: "Cloudy".to_string()
            }
        );
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("What is the weather in Paris?"));
    }

    #[tokio::test]
    async fn unparseable_answer_is_a_parse_error() {
        let forecaster = Forecaster::new(echo("Lovely weather, no idea about numbers.")).unwrap();
        let err = forecaster.forecast("Nowhere").await.unwrap_err();
        assert!(matches!(err, ForecastError::Parse(_)));
    }
}
