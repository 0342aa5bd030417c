//! Build an orchestrator from configuration.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use minutes_core::config::{ProviderConfig, ProviderCredential};
use minutes_core::errors::MinutesResult;
use minutes_core::models::ProviderKind;
use minutes_core::traits::CompletionProvider;

use crate::clients::{AnthropicClient, ChatCompletionsClient};
use crate::orchestrator::ProviderOrchestrator;

/// Configured credentials plus, when enabled, `MINUTES_<KIND>_API_KEY`
/// variables for kinds the configuration does not mention.
pub fn resolve_credentials(config: &ProviderConfig) -> Vec<ProviderCredential> {
    resolve_credentials_with(config, |name| std::env::var(name).ok())
}

/// [`resolve_credentials`] with an injectable environment lookup.
pub fn resolve_credentials_with(
    config: &ProviderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<ProviderCredential> {
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::new();
    for cred in &config.credentials {
        if !seen.insert(cred.kind) {
            warn!(provider = %cred.kind, "duplicate credential ignored");
            continue;
        }
        if cred.api_key.trim().is_empty() && cred.kind != ProviderKind::Local {
            warn!(provider = %cred.kind, "credential without API key ignored");
            continue;
        }
        resolved.push(cred.clone());
    }

    if config.load_env_credentials {
        for kind in ProviderKind::ALL {
            if seen.contains(&kind) {
                continue;
            }
            if let Some(key) = lookup(&kind.api_key_env_var()).filter(|k| !k.trim().is_empty()) {
                resolved.push(ProviderCredential::new(kind, key.trim()));
            }
        }
    }
    resolved
}

/// Construct the client for one credential.
pub fn build_client(
    cred: &ProviderCredential,
    timeout: Duration,
) -> MinutesResult<Arc<dyn CompletionProvider>> {
    let client: Arc<dyn CompletionProvider> = match cred.kind {
        ProviderKind::Anthropic => Arc::new(AnthropicClient::new(
            cred.api_key.clone(),
            cred.model.clone(),
            cred.base_url.clone(),
            timeout,
        )?),
        kind => Arc::new(ChatCompletionsClient::new(
            kind,
            cred.api_key.clone(),
            cred.model.clone(),
            cred.base_url.clone(),
            timeout,
        )?),
    };
    Ok(client)
}

/// Build an orchestrator with one client per resolved credential.
///
/// Zero credentials yields an orchestrator that reports "not configured".
pub fn build_orchestrator(config: &ProviderConfig) -> MinutesResult<ProviderOrchestrator> {
    build_orchestrator_from(config, resolve_credentials(config))
}

pub fn build_orchestrator_from(
    config: &ProviderConfig,
    credentials: Vec<ProviderCredential>,
) -> MinutesResult<ProviderOrchestrator> {
    let timeout = Duration::from_secs(config.request_timeout_secs.max(1));
    let mut orchestrator = ProviderOrchestrator::new(timeout);
    orchestrator.set_preferred(config.preferred);
    for cred in &credentials {
        orchestrator.register(build_client(cred, timeout)?);
    }
    info!(
        providers = orchestrator.provider_count(),
        order = ?orchestrator.fallback_order(),
        "provider orchestrator ready"
    );
    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_credentials_fill_unconfigured_kinds() {
        let config = ProviderConfig {
            credentials: vec![ProviderCredential::new(ProviderKind::Groq, "cfg-key")],
            ..ProviderConfig::default()
        };
        let creds = resolve_credentials_with(&config, |name| match name {
            "MINUTES_GROQ_API_KEY" => Some("env-key".into()),
            "MINUTES_ANTHROPIC_API_KEY" => Some("anthropic-key".into()),
            "MINUTES_OPENAI_API_KEY" => Some("   ".into()),
            _ => None,
        });
        let kinds: Vec<_> = creds.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ProviderKind::Groq, ProviderKind::Anthropic]);
        assert_eq!(creds[0].api_key, "cfg-key");
    }

    #[test]
    fn env_lookup_can_be_disabled() {
        let config = ProviderConfig {
            load_env_credentials: false,
            ..ProviderConfig::default()
        };
        assert!(resolve_credentials_with(&config, |_| Some("key".into())).is_empty());
    }

    #[test]
    fn blank_keys_are_ignored_except_local() {
        let config = ProviderConfig {
            load_env_credentials: false,
            credentials: vec![
                ProviderCredential::new(ProviderKind::OpenAi, ""),
                ProviderCredential::new(ProviderKind::Local, ""),
            ],
            ..ProviderConfig::default()
        };
        let creds = resolve_credentials_with(&config, |_| None);
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].kind, ProviderKind::Local);
    }

    #[test]
    fn builds_one_client_per_credential() {
        let config = ProviderConfig {
            preferred: Some(ProviderKind::Anthropic),
            ..ProviderConfig::default()
        };
        let orchestrator = build_orchestrator_from(
            &config,
            vec![
                ProviderCredential::new(ProviderKind::OpenAi, "a"),
                ProviderCredential::new(ProviderKind::Anthropic, "b"),
            ],
        )
        .unwrap();
        assert_eq!(
            orchestrator.fallback_order(),
            vec![ProviderKind::Anthropic, ProviderKind::OpenAi]
        );
    }
}
