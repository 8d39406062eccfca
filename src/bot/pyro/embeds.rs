//! Embed builders for PyroBot replies.
//!
//! Each builder takes data already fetched from the panel and returns the reply to
//! send. Empty lists become a short plain-text reply instead of an empty embed.

use crate::core::{
    format::{self, EMBED_DESCRIPTION_LIMIT, colors},
    panel::{
        Account, ApiKey, CreatedApiKey, FileEntry, PowerSignal, ServerDatabase, ServerDetails,
        ServerResources,
    },
    setup::SavedCredentials,
};
use poise::{
    CreateReply,
    serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp},
};

/// Most files shown by `/pterodactyl file list`.
pub const MAX_LISTED_FILES: usize = 15;

fn base(title: &str, color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .color(color)
        .timestamp(Timestamp::now())
}

fn embed_reply(embed: CreateEmbed) -> CreateReply {
    CreateReply::default().embed(embed)
}

fn text_reply(content: impl Into<String>) -> CreateReply {
    CreateReply::default().content(content)
}

/// `/pyrobot` success: panel URL, account and the masked key.
pub fn credentials_saved(saved: &SavedCredentials, api_key: &str) -> CreateEmbed {
    base("✅ API Credentials Saved", colors::SUCCESS)
        .description("Your Pterodactyl API credentials have been saved successfully!")
        .field("Panel URL", &saved.panel_url, false)
        .field("Panel Account", &saved.username, false)
        .field("API Key", format::mask_api_key(api_key), false)
        .footer(CreateEmbedFooter::new(
            "Your credentials are stored securely and only visible to you.",
        ))
}

/// Confirmation for a start, stop or restart signal.
pub fn power_action(server_id: &str, signal: PowerSignal) -> CreateEmbed {
    match signal {
        PowerSignal::Start => base("✅ Server Starting", colors::SUCCESS)
            .description(format!("Server `{server_id}` is starting up...")),
        PowerSignal::Stop => base("🛑 Server Stopping", colors::WARNING)
            .description(format!("Server `{server_id}` is shutting down...")),
        PowerSignal::Restart => base("🔄 Server Restarting", colors::INFO)
            .description(format!("Server `{server_id}` is restarting...")),
    }
}

/// `/server status`: state, identity and the three headline counters.
pub fn server_status(
    server_id: &str,
    details: &ServerDetails,
    usage: &ServerResources,
) -> CreateEmbed {
    let state = usage.state();
    let mut embed = base("📊 Server Status", format::state_color(state))
        .description(format!("Server: `{server_id}`"))
        .field("Status", format::state_label(state), true)
        .field("Name", &details.name, true)
        .field("UUID", or_na(&details.uuid), false);

    if let Some(resources) = &usage.resources {
        embed = embed
            .field("CPU Usage", format::format_cpu(resources.cpu_absolute), true)
            .field(
                "Memory Usage",
                format::format_megabytes(resources.memory_bytes),
                true,
            )
            .field(
                "Disk Usage",
                format::format_megabytes(resources.disk_bytes),
                true,
            );
    }
    embed
}

/// Numbered server list, or a plain notice when there are none.
pub fn server_list(servers: &[ServerDetails]) -> CreateReply {
    if servers.is_empty() {
        return text_reply("📭 You don't have any servers.");
    }

    let lines: Vec<String> = servers
        .iter()
        .enumerate()
        .map(|(index, server)| format!("**{}.** `{}` - {}", index + 1, server.identifier, server.name))
        .collect();

    embed_reply(
        base("📋 Your Servers", colors::INFO)
            .description(format::join_limited(&lines, "\n", EMBED_DESCRIPTION_LIMIT))
            .footer(CreateEmbedFooter::new(format!(
                "Total: {} server(s)",
                servers.len()
            ))),
    )
}

/// Identity, node, SFTP endpoint and limits of one server.
pub fn server_details(details: &ServerDetails) -> CreateEmbed {
    let sftp = details
        .sftp_details
        .as_ref()
        .map_or_else(|| "N/A".to_string(), |sftp| format!("{}:{}", sftp.ip, sftp.port));

    let mut embed = base("🖥️ Server Details", colors::INFO)
        .description(format!("**{}**", details.name))
        .field("Identifier", &details.identifier, true)
        .field("UUID", or_na(&details.uuid), true)
        .field("Node", details.node.as_deref().unwrap_or("N/A"), true)
        .field("SFTP Address", sftp, false);

    if let Some(limits) = &details.limits {
        embed = embed
            .field("Memory Limit", format!("{} MB", limits.memory), true)
            .field("Disk Limit", format!("{} MB", limits.disk), true)
            .field("CPU Limit", format!("{}%", limits.cpu), true);
    }
    embed
}

/// `/pterodactyl server resources`: state plus all five counters, network included.
pub fn server_resources(usage: &ServerResources) -> CreateEmbed {
    let state = usage.state();
    let mut embed = base("📊 Server Resources", format::state_color(state)).field(
        "Status",
        format::state_label(state),
        false,
    );

    if let Some(resources) = &usage.resources {
        embed = embed
            .field("CPU Usage", format::format_cpu(resources.cpu_absolute), true)
            .field(
                "Memory Usage",
                format::format_megabytes(resources.memory_bytes),
                true,
            )
            .field(
                "Disk Usage",
                format::format_megabytes(resources.disk_bytes),
                true,
            )
            .field(
                "Network RX",
                format::format_megabytes(resources.network_rx_bytes),
                true,
            )
            .field(
                "Network TX",
                format::format_megabytes(resources.network_tx_bytes),
                true,
            );
    }
    embed
}

/// Confirmation for a console command.
pub fn command_sent(server_id: &str, command: &str) -> CreateEmbed {
    base("✅ Command Sent", colors::SUCCESS)
        .description(format!("Command sent to server `{server_id}`"))
        .field("Command", format!("`{command}`"), false)
}

/// Panel account overview.
pub fn account_info(account: &Account) -> CreateEmbed {
    base("👤 Account Information", colors::INFO)
        .field("Username", &account.username, true)
        .field("Email", &account.email, true)
        .field("Admin", format::yes_no(account.admin), true)
        .field("Language", account.language.as_deref().unwrap_or("en"), true)
        .field("2FA Enabled", format::yes_no(account.two_factor), true)
}

/// The account's API keys with last use, or a plain notice when there are none.
pub fn api_key_list(keys: &[ApiKey]) -> CreateReply {
    if keys.is_empty() {
        return text_reply("📭 You don't have any API keys.");
    }

    let lines: Vec<String> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let last_used = key.last_used_at.map_or_else(
                || "Never".to_string(),
                |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
            );
            format!(
                "**{}.** {}\n   ID: `{}` | Last Used: {last_used}",
                index + 1,
                key.description,
                key.identifier
            )
        })
        .collect();

    embed_reply(
        base("🔑 Your API Keys", colors::INFO)
            .description(format::join_limited(&lines, "\n\n", EMBED_DESCRIPTION_LIMIT)),
    )
}

/// Shows a new key's secret once.
pub fn api_key_created(description: &str, created: &CreatedApiKey) -> CreateEmbed {
    let secret = created
        .meta
        .as_ref()
        .map_or("Check panel", |meta| meta.secret_token.as_str());

    base("✅ API Key Created", colors::SUCCESS)
        .description("⚠️ **Important:** Save this key now! You won't be able to see it again.")
        .field("Description", description, false)
        .field("API Key", format!("`{secret}`"), false)
}

/// Confirmation for a revoked key.
pub fn api_key_deleted(key_id: &str) -> CreateEmbed {
    base("🗑️ API Key Deleted", colors::DANGER)
        .description(format!("API key `{key_id}` has been deleted."))
}

/// First [`MAX_LISTED_FILES`] entries of a directory, or a plain notice when empty.
pub fn file_list(path: &str, files: &[FileEntry]) -> CreateReply {
    if files.is_empty() {
        return text_reply(format!("📭 No files found in `{path}`"));
    }

    let listing = files
        .iter()
        .take(MAX_LISTED_FILES)
        .map(|file| {
            if file.is_file {
                format!("📄 `{}` ({})", file.name, format::format_bytes(file.size))
            } else {
                format!("📁 `{}`", file.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    embed_reply(
        base("📁 Server Files", colors::INFO)
            .description(format!("**Path:** `{path}`\n\n{listing}"))
            .footer(CreateEmbedFooter::new(format!(
                "Showing {} of {} file(s)",
                files.len().min(MAX_LISTED_FILES),
                files.len()
            ))),
    )
}

/// Databases with host and user, or a plain notice when there are none.
pub fn database_list(databases: &[ServerDatabase]) -> CreateReply {
    if databases.is_empty() {
        return text_reply("📭 No databases found for this server.");
    }

    let lines: Vec<String> = databases
        .iter()
        .enumerate()
        .map(|(index, db)| {
            format!(
                "**{}.** {}\n   Host: `{}:{}`\n   Username: `{}`",
                index + 1,
                db.name,
                db.host.address,
                db.host.port,
                db.username
            )
        })
        .collect();

    embed_reply(
        base("🗄️ Server Databases", colors::INFO)
            .description(format::join_limited(&lines, "\n\n", EMBED_DESCRIPTION_LIMIT))
            .footer(CreateEmbedFooter::new(format!(
                "Total: {} database(s)",
                databases.len()
            ))),
    )
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}
