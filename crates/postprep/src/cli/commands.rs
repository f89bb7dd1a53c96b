//! CLI command definitions.
//!
//! Post and media indices are 0-based, matching `postprep list`.

use clap::{Args, Parser, Subcommand};
use postprep::{DEFAULT_PROJECT_FILE, UserTag};
use std::path::PathBuf;

/// postprep - Prepare social media posts and publish them to Instagram
#[derive(Parser, Debug)]
#[command(name = "postprep")]
#[command(about = "Prepare social media posts and publish them to Instagram", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Project file to operate on
    #[arg(short, long, global = true, env = "POSTPREP_PROJECT", default_value = DEFAULT_PROJECT_FILE)]
    pub project: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts with their name, kind, media count and posted flag
    List,

    /// Print one post as JSON
    Show {
        /// Post index
        post: usize,
    },

    /// Pick a post at random
    Random {
        /// Only consider posts that have not been published
        #[arg(long)]
        unposted: bool,

        /// Seed for a repeatable pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Publish every unposted post to Instagram
    Publish {
        /// Settings file to use instead of ./postprep.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    #[command(flatten)]
    Edit(EditCommand),
}

/// Commands that modify the project and save it
#[derive(Subcommand, Debug, Clone)]
pub enum EditCommand {
    /// Create a post from local media files (a carousel when more than one)
    New {
        /// Media files, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Post caption
        #[arg(long)]
        caption: Option<String>,
    },

    /// Append local media files to a post
    Add {
        /// Post index
        post: usize,

        /// Media files, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Create one post per image or video in a directory
    Import {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Move a media item to another position within its post
    MoveMedia {
        /// Post index
        post: usize,
        /// Current media position
        from: usize,
        /// New media position, clamped to the last item
        to: usize,
    },

    /// Delete a media item from a post
    DeleteMedia {
        /// Post index
        post: usize,
        /// Media position to delete
        index: usize,
        /// Currently selected media, to report where the selection moves
        #[arg(long)]
        selected: Option<usize>,
    },

    /// Delete a post
    DeletePost {
        /// Post index
        post: usize,
    },

    /// Move media into the previous post and delete the emptied post
    MergeLeft {
        /// Post index
        post: usize,
        /// Move only this media item
        #[arg(long)]
        selected: Option<usize>,
    },

    /// Move media into another post and delete the emptied post
    MergeInto {
        /// Source post index
        post: usize,
        /// Destination post index
        target: usize,
        /// Move only this media item
        #[arg(long)]
        selected: Option<usize>,
    },

    /// Replace a post's caption
    Caption {
        /// Post index
        post: usize,
        /// New caption
        text: String,
    },

    /// Edit fields of one media item
    SetMedia(SetMediaArgs),

    /// Edit post metadata and options
    SetMeta(SetMetaArgs),
}

/// Media field edits; only the given flags are applied
#[derive(Args, Debug, Clone)]
pub struct SetMediaArgs {
    /// Post index
    pub post: usize,

    /// Media position
    pub index: usize,

    /// Local file path (empty to clear)
    #[arg(long)]
    pub file: Option<String>,

    /// Public URL (empty to clear)
    #[arg(long)]
    pub url: Option<String>,

    /// Media type: image or video
    #[arg(long = "type")]
    pub media_type: Option<String>,

    /// Per-item caption
    #[arg(long)]
    pub description: Option<String>,

    /// Accessibility text
    #[arg(long)]
    pub alt_text: Option<String>,

    /// User tag as USER_ID:X:Y, repeatable; replaces existing tags
    #[arg(long = "tag", value_parser = parse_user_tag)]
    pub tags: Vec<UserTag>,

    /// Remove all user tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// Location page id
    #[arg(long)]
    pub location_id: Option<String>,

    /// Location name
    #[arg(long)]
    pub location_name: Option<String>,
}

/// Post metadata edits; only the given flags are applied
#[derive(Args, Debug, Clone)]
pub struct SetMetaArgs {
    /// Post index
    pub post: usize,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Comma-separated keywords; replaces existing keywords
    #[arg(long)]
    pub keywords: Option<String>,

    /// Post kind: single or carousel
    #[arg(long)]
    pub kind: Option<String>,

    /// Informational schedule time
    #[arg(long)]
    pub scheduled: Option<String>,

    /// Remove the schedule time
    #[arg(long, conflicts_with = "scheduled")]
    pub clear_scheduled: bool,

    /// Mark the post as published
    #[arg(long)]
    pub mark_posted: bool,

    /// Allow comments
    #[arg(long)]
    pub allow_comments: Option<bool>,

    /// Disable resharing
    #[arg(long)]
    pub disable_reshare: Option<bool>,

    /// Audience label
    #[arg(long)]
    pub audience: Option<String>,

    /// Share to the linked Facebook page
    #[arg(long)]
    pub share_to_fb: Option<bool>,
}

/// Parse `USER_ID:X:Y`; the user id may itself contain colons.
pub fn parse_user_tag(value: &str) -> Result<UserTag, String> {
    let mut parts = value.rsplitn(3, ':');
    let (Some(y), Some(x), Some(user_id)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected USER_ID:X:Y, got '{}'", value));
    };
    if user_id.trim().is_empty() {
        return Err("user id must not be empty".to_string());
    }
    let x: f64 = x.parse().map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y: f64 = y.parse().map_err(|_| format!("invalid y coordinate '{}'", y))?;
    Ok(UserTag::new(user_id.trim(), x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_tag() {
        let tag = parse_user_tag("1784:0.5:1.5").unwrap();
        assert_eq!(tag.user_id(), "1784");
        assert_eq!(*tag.x(), 0.5);
        assert_eq!(*tag.y(), 1.0);
    }

    #[test]
    fn test_parse_user_tag_rejects_garbage() {
        assert!(parse_user_tag("nobody").is_err());
        assert!(parse_user_tag(":0.1:0.2").is_err());
        assert!(parse_user_tag("someone:left:0.2").is_err());
    }

    #[test]
    fn test_cli_parses_edit_commands() {
        let cli = Cli::try_parse_from([
            "postprep",
            "--project",
            "work.json",
            "merge-into",
            "2",
            "0",
            "--selected",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.project, PathBuf::from("work.json"));
        assert!(matches!(
            cli.command,
            Commands::Edit(EditCommand::MergeInto {
                post: 2,
                target: 0,
                selected: Some(1)
            })
        ));
    }

    #[test]
    fn test_cli_parses_repeated_tags() {
        let cli = Cli::try_parse_from([
            "postprep", "set-media", "0", "1", "--tag", "a:0.1:0.2", "--tag", "b:0.3:0.4",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit(EditCommand::SetMedia(args)) => assert_eq!(args.tags.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
