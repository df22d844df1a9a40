use crate::libs::tracker::Category;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_CATEGORY: &str = "INSERT INTO categories (title) VALUES (?1)";
const SELECT_VISIBLE_CATEGORIES: &str = "SELECT title FROM categories WHERE is_reserved = FALSE ORDER BY title";
const SELECT_CATEGORY_BY_TITLE: &str = "SELECT id, title, is_reserved FROM categories WHERE title = ?1";
const SELECT_CATEGORY_BY_TRACKER: &str = "
    SELECT c.id, c.title, c.is_reserved FROM categories c
    JOIN trackers t ON t.category_id = c.id
    WHERE t.id = ?1
";
const SELECT_RESERVED_CATEGORIES: &str = "SELECT id, title, is_reserved FROM categories WHERE is_reserved = TRUE";
const UPDATE_RESERVED: &str = "UPDATE categories SET is_reserved = ?2 WHERE id = ?1";
const COUNT_HOMED_TRACKERS: &str = "SELECT COUNT(*) FROM trackers WHERE category_id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";

/// A category row with its storage id, which never leaves the db layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: i64,
    pub title: String,
    pub is_reserved: bool,
}

/// Category rows, over any connection or open transaction.
pub struct Categories<'c> {
    conn: &'c Connection,
}

impl<'c> Categories<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Inserts a category and returns its row id.
    pub fn create(&self, title: &str) -> Result<i64> {
        self.conn.execute(INSERT_CATEGORY, params![title])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// User-facing categories ordered by title; the reserved sentinel is left out.
    pub fn list_visible(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_VISIBLE_CATEGORIES)?;
        let category_iter = stmt.query_map([], |row| Ok(Category { title: row.get(0)? }))?;

        let mut categories = Vec::new();
        for category in category_iter {
            categories.push(category?);
        }
        Ok(categories)
    }

    pub fn get_by_title(&self, title: &str) -> Result<Option<CategoryRow>> {
        self.conn.query_row(SELECT_CATEGORY_BY_TITLE, params![title], Self::from_row).optional()
    }

    /// Home category of a tracker.
    pub fn get_by_tracker(&self, tracker_id: &str) -> Result<Option<CategoryRow>> {
        self.conn.query_row(SELECT_CATEGORY_BY_TRACKER, params![tracker_id], Self::from_row).optional()
    }

    /// Returns the id of the category with `title`, creating it if needed.
    ///
    /// The flag is `true` when a row was inserted.
    pub fn get_or_create(&self, title: &str) -> Result<(i64, bool)> {
        match self.get_by_title(title)? {
            Some(category) => Ok((category.id, false)),
            None => Ok((self.create(title)?, true)),
        }
    }

    pub fn reserved(&self) -> Result<Vec<CategoryRow>> {
        let mut stmt = self.conn.prepare(SELECT_RESERVED_CATEGORIES)?;
        let category_iter = stmt.query_map([], Self::from_row)?;

        let mut categories = Vec::new();
        for category in category_iter {
            categories.push(category?);
        }
        Ok(categories)
    }

    pub fn set_reserved(&self, id: i64, reserved: bool) -> Result<usize> {
        self.conn.execute(UPDATE_RESERVED, params![id, reserved])
    }

    /// Number of trackers whose home is this category.
    pub fn tracker_count(&self, id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_HOMED_TRACKERS, params![id], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_CATEGORY, params![id])
    }

    fn from_row(row: &Row<'_>) -> Result<CategoryRow> {
        Ok(CategoryRow {
            id: row.get(0)?,
            title: row.get(1)?,
            is_reserved: row.get(2)?,
        })
    }
}
