use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// Delivery target kinds supported by the notification backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    SlackWebhook,
    DiscordWebhook,
    #[serde(alias = "email")]
    EmailWebhook,
    TwitterApi,
}

impl ChannelKind {
    /// Short human label for listings
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::SlackWebhook => "Slack",
            ChannelKind::DiscordWebhook => "Discord",
            ChannelKind::EmailWebhook => "Email",
            ChannelKind::TwitterApi => "X / Twitter",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::SlackWebhook => "slack_webhook",
            ChannelKind::DiscordWebhook => "discord_webhook",
            ChannelKind::EmailWebhook => "email_webhook",
            ChannelKind::TwitterApi => "twitter_api",
        };
        write!(f, "{}", name)
    }
}

/// A configured delivery target for rule-triggered alerts
///
/// `settings` stays a raw document here; its shape depends on `kind` and is
/// validated by the backend before persistence. `typed_settings()` is the
/// strict decoded view for callers that want one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: ChannelKind,

    #[serde(default)]
    pub settings: Value,

    /// Number of rules referencing this channel (display only, not enforced)
    #[serde(default)]
    pub rule_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackSettings {
    pub webhook_url: String,

    /// Bot username shown in the Slack message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordSettings {
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterSettings {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// Channel settings decoded against the channel's declared kind
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSettings {
    Slack(SlackSettings),
    Discord(DiscordSettings),
    Email(EmailSettings),
    Twitter(TwitterSettings),
}

impl NotificationChannel {
    /// Decode `settings` against the declared kind.
    ///
    /// This is the optional strict view; display surfaces work off the raw
    /// document and never require it.
    pub fn typed_settings(&self) -> Result<ChannelSettings> {
        let settings = self.settings.clone();
        let decoded = match self.kind {
            ChannelKind::SlackWebhook => serde_json::from_value(settings)
                .map(ChannelSettings::Slack)
                .map_err(|e| Error::Settings(format!("{}: {}", self.kind, e)))?,
            ChannelKind::DiscordWebhook => serde_json::from_value(settings)
                .map(ChannelSettings::Discord)
                .map_err(|e| Error::Settings(format!("{}: {}", self.kind, e)))?,
            ChannelKind::EmailWebhook => serde_json::from_value(settings)
                .map(ChannelSettings::Email)
                .map_err(|e| Error::Settings(format!("{}: {}", self.kind, e)))?,
            ChannelKind::TwitterApi => serde_json::from_value(settings)
                .map(ChannelSettings::Twitter)
                .map_err(|e| Error::Settings(format!("{}: {}", self.kind, e)))?,
        };
        Ok(decoded)
    }
}

/// Rule settings envelope; `rules` holds the raw condition document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default)]
    pub rules: Value,
}

/// A named binding of an event type + condition document to a channel
///
/// Many rules may reference one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRule {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Event identifier, e.g. "NFT_LISTED"
    pub event: String,

    pub channel_id: String,

    #[serde(default)]
    pub settings: RuleSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_kind_names() {
        let kind: ChannelKind = serde_json::from_value(json!("slack_webhook")).unwrap();
        assert_eq!(kind, ChannelKind::SlackWebhook);

        // "email" is accepted as a legacy alias for "email_webhook"
        let kind: ChannelKind = serde_json::from_value(json!("email")).unwrap();
        assert_eq!(kind, ChannelKind::EmailWebhook);

        let serialized = serde_json::to_value(ChannelKind::TwitterApi).unwrap();
        assert_eq!(serialized, json!("twitter_api"));
    }

    #[test]
    fn test_channel_round_trip() {
        let raw = json!({
            "id": "7",
            "name": "ops alerts",
            "type": "discord_webhook",
            "settings": { "webhook_url": "https://discord.com/api/webhooks/1/x" },
            "rule_count": 3
        });

        let channel: NotificationChannel = serde_json::from_value(raw).unwrap();
        assert_eq!(channel.kind, ChannelKind::DiscordWebhook);
        assert_eq!(channel.rule_count, 3);

        match channel.typed_settings().unwrap() {
            ChannelSettings::Discord(settings) => {
                assert_eq!(settings.webhook_url, "https://discord.com/api/webhooks/1/x");
            }
            other => panic!("Wrong settings variant: {:?}", other),
        }
    }

    #[test]
    fn test_typed_settings_shape_mismatch() {
        let channel = NotificationChannel {
            id: "9".to_string(),
            name: "mail".to_string(),
            kind: ChannelKind::EmailWebhook,
            settings: json!({ "webhook_url": "not-an-email-shape" }),
            rule_count: 0,
            created_at: None,
        };

        let err = channel.typed_settings().unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_rule_defaults() {
        let raw = json!({
            "id": "42",
            "event": "NFT_LISTED",
            "channel_id": "7"
        });

        let rule: NotificationRule = serde_json::from_value(raw).unwrap();
        assert!(rule.name.is_none());
        assert!(rule.settings.rules.is_null());
    }
}
