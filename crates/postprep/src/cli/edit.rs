//! Project-modifying command handlers.

use super::commands::{EditCommand, SetMediaArgs, SetMetaArgs};
use postprep::{
    Location, MediaField, MediaType, Post, PostKind, PostMetaField, PostOptions, PostprepResult,
    Project, ProjectFile, import_directory, split_keywords,
};
use tracing::instrument;

/// Load the project, apply `command` and save it when something changed.
#[instrument(skip(file), fields(path = %file.path().display()))]
pub fn run_edit(file: &ProjectFile, command: EditCommand) -> PostprepResult<()> {
    let mut project = file.load_or_default()?;
    match apply(&mut project, command)? {
        Some(message) => {
            file.save(&project)?;
            println!("{}", message);
        }
        None => println!("Nothing changed"),
    }
    Ok(())
}

/// Apply one command to `project`.
///
/// Returns a summary when the project changed, `None` for a no-op.
pub fn apply(project: &mut Project, command: EditCommand) -> PostprepResult<Option<String>> {
    let message = match command {
        EditCommand::New { files, caption } => {
            let kind = if files.len() > 1 {
                PostKind::Carousel
            } else {
                PostKind::Single
            };
            let mut post = Post::new(kind, caption.unwrap_or_default(), Vec::new());
            post.add_media_files(&files);
            let index = project.push(post);
            Some(format!("Created post {} with {} media", index, files.len()))
        }

        EditCommand::Add { post, files } => project.post_mut(post).map(|target| {
            target.add_media_files(&files);
            format!("Added {} media to post {}", files.len(), post)
        }),

        EditCommand::Import { dir } => {
            let before = project.len();
            import_directory(project, &dir)?.map(|first| {
                format!(
                    "Imported {} posts starting at {}",
                    project.len() - before,
                    first
                )
            })
        }

        EditCommand::MoveMedia { post, from, to } => project
            .post_mut(post)
            .and_then(|target| target.move_media(from, to))
            .map(|moved| format!("Moved media {} to {} in post {}", from, moved, post)),

        EditCommand::DeleteMedia {
            post,
            index,
            selected,
        } => project.post_mut(post).and_then(|target| {
            let before = target.media().len();
            let selection = target.delete_media(index, selected);
            (target.media().len() < before).then(|| {
                format!(
                    "Deleted media {} from post {}; selection {}",
                    index,
                    post,
                    describe_index(selection)
                )
            })
        }),

        EditCommand::DeletePost { post } => project.delete_post(post).map(|removed| {
            format!(
                "Deleted {}; current post {}",
                removed.display_name(post),
                describe_index(project.index_after_removal(post))
            )
        }),

        EditCommand::MergeLeft { post, selected } => project
            .merge_left(post, selected)
            .map(|current| format!("Merged post {} into post {}", post, current)),

        EditCommand::MergeInto {
            post,
            target,
            selected,
        } => project
            .merge_into(post, target, selected)
            .map(|current| format!("Merged post {} into post {} (now {})", post, target, current)),

        EditCommand::Caption { post, text } => project
            .set_caption(Some(post), text)
            .then(|| format!("Updated caption of post {}", post)),

        EditCommand::SetMedia(args) => apply_media_fields(project, args),

        EditCommand::SetMeta(args) => apply_meta_fields(project, args),
    };
    Ok(message)
}

fn describe_index(index: Option<usize>) -> String {
    index.map_or_else(|| "none".to_string(), |index| index.to_string())
}

fn blank_as_none(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn apply_media_fields(project: &mut Project, args: SetMediaArgs) -> Option<String> {
    let SetMediaArgs {
        post,
        index,
        file,
        url,
        media_type,
        description,
        alt_text,
        tags,
        clear_tags,
        location_id,
        location_name,
    } = args;

    let current = project.post(post)?.media().get(index)?;
    let mut fields = Vec::new();

    if let Some(file) = file {
        fields.push(MediaField::FilePath(blank_as_none(file)));
    }
    if let Some(url) = url {
        fields.push(MediaField::Url(blank_as_none(url)));
    }
    if let Some(media_type) = media_type {
        fields.push(MediaField::Type(MediaType::from(media_type)));
    }
    if let Some(description) = description {
        fields.push(MediaField::Description(description));
    }
    if let Some(alt_text) = alt_text {
        fields.push(MediaField::AltText(alt_text));
    }
    if clear_tags || !tags.is_empty() {
        fields.push(MediaField::UserTags(tags));
    }
    if location_id.is_some() || location_name.is_some() {
        let existing = current.location();
        let id = location_id.map_or_else(|| existing.id().clone(), blank_as_none);
        let name = location_name.map_or_else(|| existing.name().clone(), blank_as_none);
        fields.push(MediaField::Location(Location::new(id, name)));
    }

    if fields.is_empty() {
        return None;
    }
    let count = fields.len();
    project
        .post_mut(post)?
        .update_media_fields(index, fields)
        .then(|| format!("Updated {} field(s) of media {} in post {}", count, index, post))
}

fn apply_meta_fields(project: &mut Project, args: SetMetaArgs) -> Option<String> {
    let SetMetaArgs {
        post,
        name,
        keywords,
        kind,
        scheduled,
        clear_scheduled,
        mark_posted,
        allow_comments,
        disable_reshare,
        audience,
        share_to_fb,
    } = args;

    let options = project.post(post)?.post_options().clone();
    let mut fields = Vec::new();

    if let Some(name) = name {
        fields.push(PostMetaField::PostName(name));
    }
    if let Some(keywords) = keywords {
        fields.push(PostMetaField::Keywords(split_keywords(&keywords)));
    }
    if let Some(kind) = kind {
        fields.push(PostMetaField::Kind(PostKind::from(kind)));
    }
    if clear_scheduled {
        fields.push(PostMetaField::ScheduledTime(None));
    } else if let Some(scheduled) = scheduled {
        fields.push(PostMetaField::ScheduledTime(blank_as_none(scheduled)));
    }
    if allow_comments.is_some()
        || disable_reshare.is_some()
        || audience.is_some()
        || share_to_fb.is_some()
    {
        fields.push(PostMetaField::Options(PostOptions::new(
            allow_comments.unwrap_or(*options.allow_comments()),
            disable_reshare.unwrap_or(*options.disable_reshare()),
            audience.unwrap_or_else(|| options.audience().clone()),
            share_to_fb.unwrap_or(*options.share_to_fb()),
        )));
    }
    if mark_posted {
        fields.push(PostMetaField::MarkPosted);
    }

    if fields.is_empty() {
        return None;
    }
    let count = fields.len();
    for field in fields {
        project.update_post_meta(Some(post), field);
    }
    Some(format!("Updated {} field(s) of post {}", count, post))
}
