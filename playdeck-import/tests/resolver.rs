use std::cell::Cell;

use playdeck_catalog::types::*;
use playdeck_db::{CatalogStore, OperationError, SqliteCatalog, insert_category, list_categories};
use playdeck_import::*;

#[test]
fn resolves_existing_or_creates() {
    let store = SqliteCatalog::open_memory().unwrap();

    let first = resolve_category(&store, "Arcade").unwrap();
    assert!(first.created);
    assert_eq!(first.category.name, "Arcade");
    assert_eq!(first.category.slug, "arcade");

    let second = resolve_category(&store, "  ARCADE ").unwrap();
    assert!(!second.created);
    assert_eq!(second.category.id, first.category.id);
    assert_eq!(list_categories(store.conn()).unwrap().len(), 1);
}

#[test]
fn unusable_label_is_rejected() {
    let store = SqliteCatalog::open_memory().unwrap();
    assert!(matches!(
        resolve_category(&store, "???"),
        Err(ImportError::InvalidCandidate(_))
    ));
}

/// Simulates another writer creating the category between our lookup and
/// our insert.
struct RacingStore {
    inner: SqliteCatalog,
    raced: Cell<bool>,
}

impl CatalogStore for RacingStore {
    fn find_game_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> Result<Option<Game>, OperationError> {
        self.inner.find_game_by_title_or_slug(title, slug)
    }

    fn games_matching(
        &self,
        titles: &[String],
        slugs: &[String],
    ) -> Result<Vec<(String, String)>, OperationError> {
        self.inner.games_matching(titles, slugs)
    }

    fn create_game(&self, game: &NewGame) -> Result<Game, OperationError> {
        self.inner.create_game(game)
    }

    fn update_game(&self, id: i64, update: &GameUpdate) -> Result<Game, OperationError> {
        self.inner.update_game(id, update)
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, OperationError> {
        if !self.raced.replace(true) {
            insert_category(
                self.inner.conn(),
                &NewCategory {
                    name: "Arcade Games".to_string(),
                    slug: slug.to_string(),
                    description: None,
                    image: None,
                },
            )?;
            return Ok(None);
        }
        self.inner.find_category_by_slug(slug)
    }

    fn create_category(&self, category: &NewCategory) -> Result<Category, OperationError> {
        self.inner.create_category(category)
    }
}

#[test]
fn concurrent_first_creation_is_recovered() {
    let store = RacingStore {
        inner: SqliteCatalog::open_memory().unwrap(),
        raced: Cell::new(false),
    };

    let resolved = resolve_category(&store, "Arcade").unwrap();
    assert!(!resolved.created);
    assert_eq!(resolved.category.name, "Arcade Games");

    let again = resolve_category(&store, "Arcade").unwrap();
    assert_eq!(again.category.id, resolved.category.id);

    let categories = list_categories(store.inner.conn()).unwrap();
    assert_eq!(categories.len(), 1);
}

/// Claims every category already exists but never returns one.
struct PhantomCategories(SqliteCatalog);

impl CatalogStore for PhantomCategories {
    fn find_game_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> Result<Option<Game>, OperationError> {
        self.0.find_game_by_title_or_slug(title, slug)
    }

    fn games_matching(
        &self,
        titles: &[String],
        slugs: &[String],
    ) -> Result<Vec<(String, String)>, OperationError> {
        self.0.games_matching(titles, slugs)
    }

    fn create_game(&self, game: &NewGame) -> Result<Game, OperationError> {
        self.0.create_game(game)
    }

    fn update_game(&self, id: i64, update: &GameUpdate) -> Result<Game, OperationError> {
        self.0.update_game(id, update)
    }

    fn find_category_by_slug(&self, _slug: &str) -> Result<Option<Category>, OperationError> {
        Ok(None)
    }

    fn create_category(&self, category: &NewCategory) -> Result<Category, OperationError> {
        Err(OperationError::AlreadyExists {
            entity_type: "category".to_string(),
            key: category.slug.clone(),
        })
    }
}

#[test]
fn conflict_without_refetch_is_reported() {
    let store = PhantomCategories(SqliteCatalog::open_memory().unwrap());
    match resolve_category(&store, "Arcade") {
        Err(ImportError::CategoryCreateConflict { slug }) => assert_eq!(slug, "arcade"),
        other => panic!("expected CategoryCreateConflict, got {other:?}"),
    }
}
