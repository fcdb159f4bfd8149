use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),
    #[error("no value supplied for prompt variable '{0}'")]
    MissingVariable(String),
    #[error("failed to describe the expected output: {0}")]
    Schema(String),
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> PromptError {
        PromptError::Schema(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Variable(String),
}

/// A text template with `{name}` placeholders.
///
/// The template is split into segments once, so rendering is a single pass
/// and substituted values are never themselves scanned for placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Result<PromptTemplate, PromptError> {
        let mut segments = Vec::new();
        let mut rest = template;
        let mut offset = 0;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                return Err(PromptError::Unterminated(offset + start));
            };
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            segments.push(Segment::Variable(
                rest[start + 1..start + len].trim().to_string(),
            ));
            offset += start + len + 1;
            rest = &rest[start + len + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(PromptTemplate { segments })
    }

    pub fn input_variables(&self) -> Vec<&str> {
        let mut variables: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment {
                if !variables.contains(&name.as_str()) {
                    variables.push(name);
                }
            }
        }
        variables
    }

    pub fn format(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Variable(name) => {
                    let Some((_, value)) = values.iter().find(|(key, _)| *key == name.as_str()) else {
                        return Err(PromptError::MissingVariable(name.clone()));
                    };
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn weather_question_has_location_variable() {
        let template = PromptTemplate::new("What is the weather in {location}?").unwrap();
        assert_eq!(template.input_variables(), vec!["location"]);
        assert_eq!(
            template.format(&[("location", "Paris")]).unwrap(),
            "What is the weather in Paris?"
        );
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let template = PromptTemplate::new("{a} and {b}").unwrap();
        assert_eq!(
            template.format(&[("a", "{b}"), ("b", "x")]).unwrap(),
            "{b} and x"
        );
    }

    #[test]
    fn repeated_variable_is_listed_once() {
        let template = PromptTemplate::new("{city}, {city}!").unwrap();
        assert_eq!(template.input_variables(), vec!["city"]);
        assert_eq!(template.format(&[("city", "Oslo")]).unwrap(), "Oslo, Oslo!");
    }

    #[test]
    fn missing_value_is_an_error() {
        let template = PromptTemplate::new("What is the weather in {location}?").unwrap();
        assert_eq!(
            template.format(&[]).unwrap_err(),
            PromptError::MissingVariable("location".to_string())
        );
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        assert_eq!(
            PromptTemplate::new("Weather in {location").unwrap_err(),
            PromptError::Unterminated(11)
        );
    }

    #[test]
    fn schema_failure_is_a_prompt_error() {
        let err = serde_json::from_str::<u8>("not a number").unwrap_err();
        let message = err.to_string();
        let err = PromptError::from(err);
        assert_eq!(err, PromptError::Schema(message));
        assert!(err.to_string().starts_with("failed to describe the expected output"));
    }

    #[test]
    fn template_without_variables_renders_verbatim() {
        let template = PromptTemplate::new("Hello there").unwrap();
        assert!(template.input_variables().is_empty());
        assert_eq!(template.format(&[]).unwrap(), "Hello there");
    }
}
