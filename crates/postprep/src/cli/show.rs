//! Read-only command handlers.

use postprep::{JsonError, Post, PostprepResult, Project};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One listing row: index, name, kind, media count, posted flag.
pub fn format_row(index: usize, post: &Post) -> String {
    format!(
        "{:>4}  {:<28} {:<9} {:>5}  {}",
        index,
        post.display_name(index),
        post.post_kind().to_string(),
        post.media().len(),
        if post.is_posted() { "posted" } else { "-" }
    )
}

/// Print every post.
pub fn list(project: &Project) {
    if project.is_empty() {
        println!("No posts");
        return;
    }
    println!("{:>4}  {:<28} {:<9} {:>5}  {}", "#", "NAME", "KIND", "MEDIA", "STATUS");
    for (index, post) in project.posts().iter().enumerate() {
        println!("{}", format_row(index, post));
    }
}

/// Print one post as pretty JSON.
pub fn show(project: &Project, index: usize) -> PostprepResult<()> {
    match project.post(index) {
        Some(post) => {
            let json = serde_json::to_string_pretty(post)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        None => println!("No post at index {}", index),
    }
    Ok(())
}

/// Pick a post at random, seeded when `seed` is given.
pub fn pick_random(project: &Project, unposted: bool, seed: Option<u64>) -> Option<usize> {
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    if unposted {
        project.random_unposted_post(&mut rng)
    } else {
        project.random_post(&mut rng)
    }
}

/// Print a random pick.
pub fn random(project: &Project, unposted: bool, seed: Option<u64>) {
    match pick_random(project, unposted, seed).and_then(|index| Some((index, project.post(index)?))) {
        Some((index, post)) => println!("{}", format_row(index, post)),
        None if unposted => println!("No unposted posts"),
        None => println!("No posts"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postprep::{PostKind, PostMetaField};

    #[test]
    fn test_format_row() {
        let mut post = Post::from_file("shots/a.jpg");
        assert!(format_row(0, &post).contains("Post 1"));

        post.update_meta(PostMetaField::PostName("Harbor".into()));
        post.mark_posted();
        let row = format_row(3, &post);
        assert!(row.contains("Harbor"));
        assert!(row.contains("single"));
        assert!(row.ends_with("posted"));
    }

    #[test]
    fn test_random_unposted_only() {
        let mut posted = Post::new(PostKind::Single, "", Vec::new());
        posted.mark_posted();
        let project = Project::new(vec![posted.clone(), Post::default(), posted]);

        for seed in 0..20 {
            assert_eq!(pick_random(&project, true, Some(seed)), Some(1));
        }
    }

    #[test]
    fn test_random_is_repeatable_with_seed() {
        let project = Project::new(vec![Post::default(); 5]);
        assert_eq!(
            pick_random(&project, false, Some(7)),
            pick_random(&project, false, Some(7))
        );
        assert_eq!(pick_random(&Project::default(), false, Some(7)), None);
    }
}
