//! Find-or-create for categories named by feed labels.

use playdeck_catalog::{Category, NewCategory, normalize_slug};
use playdeck_db::{CatalogStore, OperationError};

use crate::error::ImportError;

/// A resolved category and whether this call created it.
#[derive(Debug, Clone)]
pub struct ResolvedCategory {
    pub category: Category,
    pub created: bool,
}

/// Look up the category whose slug matches `label`, creating it if absent.
///
/// A slug collision on create means another writer got there first; the
/// existing row is re-fetched and returned.
pub fn resolve_category(
    store: &dyn CatalogStore,
    label: &str,
) -> Result<ResolvedCategory, ImportError> {
    let slug = normalize_slug(label);
    if slug.is_empty() {
        return Err(ImportError::InvalidCandidate(format!(
            "category '{label}' has no usable characters"
        )));
    }

    if let Some(category) = store.find_category_by_slug(&slug)? {
        return Ok(ResolvedCategory {
            category,
            created: false,
        });
    }

    let new_category = NewCategory {
        name: label.trim().to_string(),
        slug: slug.clone(),
        description: None,
        image: None,
    };
    match store.create_category(&new_category) {
        Ok(category) => {
            log::debug!("Created category '{}' ({})", category.name, category.slug);
            Ok(ResolvedCategory {
                category,
                created: true,
            })
        }
        Err(OperationError::AlreadyExists { .. }) => {
            log::warn!("Category '{}' was created concurrently, re-fetching", slug);
            match store.find_category_by_slug(&slug)? {
                Some(category) => Ok(ResolvedCategory {
                    category,
                    created: false,
                }),
                None => Err(ImportError::CategoryCreateConflict { slug }),
            }
        }
        Err(e) => Err(e.into()),
    }
}
