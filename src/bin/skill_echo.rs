use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use log::{debug, info};
use skillserver::{RequestType, RequestValidator, SkillRequest, SkillResponse, ValidatorConfig};
use std::io::Read;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("skill-echo")
        .version(skillserver::VERSION)
        .about("Decode a skill request and print an echo response")
        .arg(
            Arg::new("request")
                .short('r')
                .long("request")
                .value_name("FILE")
                .help("Request JSON file (reads stdin when omitted)"),
        )
        .arg(
            Arg::new("app-id")
                .short('a')
                .long("app-id")
                .value_name("ID")
                .help("Expected application id"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Validator configuration (JSON, or YAML with yaml-support)"),
        )
        .arg(
            Arg::new("skip-timestamp")
                .long("skip-timestamp")
                .help("Do not reject stale requests")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .help("Pretty-print the response")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let body = match matches.get_one::<String>("request") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request file {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading request from stdin")?;
            buffer
        }
    };

    let config = match matches.get_one::<String>("config") {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    };
    let validator = RequestValidator::new(config);

    let request = SkillRequest::from_json(&body)?;
    info!(
        "Received {} (request {}, session {})",
        request.request_type(),
        request.request_id(),
        request.session_id()
    );

    verify_request(
        &validator,
        &request,
        matches.get_one::<String>("app-id").map(String::as_str),
        matches.get_flag("skip-timestamp"),
    )?;

    let response = echo_response(&request);
    let output = if matches.get_flag("pretty") {
        response.to_json_pretty()?
    } else {
        response.to_json()?
    };
    println!("{}", output);

    Ok(())
}

/// Apply the configured gate; `skip_timestamp` only bypasses freshness
fn verify_request(
    validator: &RequestValidator,
    request: &SkillRequest,
    app_id: Option<&str>,
    skip_timestamp: bool,
) -> skillserver::Result<()> {
    if skip_timestamp {
        validator.check_app_id(request, app_id)
    } else {
        validator.validate(request, app_id)
    }
}

/// Speak back the intent and its slots
fn echo_response(request: &SkillRequest) -> SkillResponse {
    let mut response = SkillResponse::new();

    match request.request.request_type {
        RequestType::Launch => {
            response
                .output_speech("Echo is listening. Say something.")
                .reprompt("Say something and I will repeat it.")
                .end_session(false);
        }
        RequestType::SessionEnded => {
            debug!("Session ended: {}", request.reason().unwrap_or("unknown"));
            response.clear_end_session();
        }
        _ => {
            let mut slots: Vec<_> = request
                .all_slots()
                .iter()
                .filter(|(_, slot)| !slot.value.is_empty())
                .map(|(name, slot)| format!("{} is {}", name, slot.value))
                .collect();
            slots.sort();

            let speech = if slots.is_empty() {
                format!("You asked for {}.", request.intent_name())
            } else {
                format!("You asked for {} where {}.", request.intent_name(), slots.join(", "))
            };

            response
                .output_speech(&speech)
                .simple_card(request.intent_name(), &speech);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillserver::OutputSpeech;

    const APP_ID: &str = "amzn1.ask.skill.echo";

    fn stale_launch() -> SkillRequest {
        SkillRequest::from_json(
            r#"{"session":{"application":{"applicationId":"amzn1.ask.skill.echo"}},
                "request":{"type":"LaunchRequest","timestamp":"2020-01-01T00:00:00Z"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_verify_honours_require_app_id() {
        let strict = RequestValidator::new(ValidatorConfig::default());
        assert!(verify_request(&strict, &stale_launch(), None, true).is_err());
        assert!(verify_request(&strict, &stale_launch(), Some(APP_ID), true).is_ok());
        assert!(verify_request(&strict, &stale_launch(), Some("amzn1.ask.skill.other"), true).is_err());

        let relaxed = RequestValidator::new(ValidatorConfig {
            require_app_id: false,
            ..ValidatorConfig::default()
        });
        assert!(verify_request(&relaxed, &stale_launch(), None, true).is_ok());
    }

    #[test]
    fn test_verify_rejects_stale_unless_skipped() {
        let validator = RequestValidator::new(ValidatorConfig::default());
        assert!(verify_request(&validator, &stale_launch(), Some(APP_ID), false).is_err());
        assert!(verify_request(&validator, &stale_launch(), Some(APP_ID), true).is_ok());
    }

    #[test]
    fn test_echo_launch_keeps_session_open() {
        let request = SkillRequest::from_json(r#"{"request":{"type":"LaunchRequest"}}"#).unwrap();
        let response = echo_response(&request);
        assert_eq!(response.response.should_end_session, Some(false));
        assert!(response.response.reprompt.is_some());
    }

    #[test]
    fn test_echo_intent_lists_slots() {
        let request = SkillRequest::from_json(
            r#"{"request":{"type":"IntentRequest","intent":{"name":"Repeat","slots":{
                "Word":{"name":"Word","value":"banana"},
                "Empty":{"name":"Empty"}
            }}}}"#,
        )
        .unwrap();
        let response = echo_response(&request);
        assert_eq!(
            response.response.output_speech,
            Some(OutputSpeech::plain_text("You asked for Repeat where Word is banana."))
        );
        assert_eq!(response.response.should_end_session, Some(true));
    }

    #[test]
    fn test_echo_session_ended_omits_flag() {
        let request = SkillRequest::from_json(
            r#"{"request":{"type":"SessionEndedRequest","reason":"USER_INITIATED"}}"#,
        )
        .unwrap();
        assert_eq!(echo_response(&request).response.should_end_session, None);
    }
}
