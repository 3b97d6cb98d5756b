//! Plain-text table rendering of a [`Snapshot`].
//!
//! Foreign keys are shown by label: a post's author by name, a comment's
//! post by title. Ids missing from the snapshot render as `ID {id}`.

use crate::labels::TieBreak;
use crate::snapshot::Snapshot;

/// Render the users table.
pub fn users(snapshot: &Snapshot) -> String {
    let rows = snapshot
        .users
        .iter()
        .map(|u| vec![u.id.to_string(), u.name.clone(), u.email.clone()])
        .collect::<Vec<_>>();
    table(&["ID", "Name", "Email"], &rows)
}

/// Render the posts table.
pub fn posts(snapshot: &Snapshot) -> String {
    let authors = snapshot.user_labels(TieBreak::default());
    let rows = snapshot
        .posts
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.title.clone(),
                p.content.clone(),
                authors.display(p.user_id),
            ]
        })
        .collect::<Vec<_>>();
    table(&["ID", "Title", "Content", "User"], &rows)
}

/// Render the comments table.
pub fn comments(snapshot: &Snapshot) -> String {
    let authors = snapshot.user_labels(TieBreak::default());
    let titles = snapshot.post_labels(TieBreak::default());
    let rows = snapshot
        .comments
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.content.clone(),
                titles.display(c.post_id),
                authors.display(c.user_id),
            ]
        })
        .collect::<Vec<_>>();
    table(&["ID", "Content", "Post", "User"], &rows)
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use postboard_types::{Comment, CommentId, Post, PostId, User, UserId};

    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            users: vec![User {
                id: UserId(1),
                name: String::from("Ada"),
                email: String::from("ada@x.com"),
            }],
            posts: vec![Post {
                id: PostId(1),
                title: String::from("T"),
                content: String::from("C"),
                user_id: UserId(1),
            }],
            comments: vec![Comment {
                id: CommentId(1),
                content: String::from("hi"),
                post_id: PostId(1),
                user_id: UserId(9),
            }],
        }
    }

    #[test]
    fn users_table_aligns_columns() {
        let text = users(&snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            ["ID  Name  Email", "--  ----  ---------", "1   Ada   ada@x.com"]
        );
    }

    #[test]
    fn posts_show_author_name() {
        assert!(posts(&snapshot()).lines().nth(2).is_some_and(|l| l.ends_with("Ada")));
    }

    #[test]
    fn comments_fall_back_to_placeholder() {
        let text = comments(&snapshot());
        let row = text.lines().nth(2).unwrap_or_default();
        assert!(row.contains('T'));
        assert!(row.ends_with("ID 9"));
    }

    #[test]
    fn empty_snapshot_renders_headers_only() {
        assert_eq!(users(&Snapshot::default()).lines().count(), 2);
    }
}
