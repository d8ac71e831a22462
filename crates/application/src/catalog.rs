//! Variable catalog controller
//!
//! Holds the state behind the variables panel: the search box (with its
//! debounced copy), the selected category, favorites and recently used
//! names. Favorites persist through a [`KeyValueStore`]; recents live only
//! as long as the catalog.

use std::time::Duration;

use applymail_domain::{
    Category, CategoryFilter, CategoryId, FAVORITES_STORAGE_KEY, FavoriteSet, PlaceholderRegistry,
    RecentlyUsed, ValueSource, Variable,
};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::editing::insert_token;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{CancellableTimer, Clock, EditableBuffer, KeyValueStore};
use crate::variable_resolver::ValueResolver;

/// Quiet period before a search term is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

const FAVORITE_STAND_IN: &str = "Favorite variable";
const RECENT_STAND_IN: &str = "Recently used variable";

/// A row of the filtered variable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleVariable {
    /// The variable itself.
    pub variable: Variable,
    /// The category the row is listed under.
    pub category: CategoryId,
    /// Whether the variable is a favorite.
    pub is_favorite: bool,
    /// Whether the variable was used recently.
    pub is_recent: bool,
}

impl VisibleVariable {
    /// Display name of the category the row is listed under.
    #[must_use]
    pub const fn category_name(&self) -> &'static str {
        self.category.display_name()
    }

    /// Accent color of the category the row is listed under.
    #[must_use]
    pub const fn category_color(&self) -> &'static str {
        self.category.color()
    }
}

/// Hover card for a variable: what it is and what it would render as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePreview {
    /// The variable.
    pub variable: Variable,
    /// Its real category, if it is registered.
    pub category: Option<CategoryId>,
    /// The resolved example value.
    pub example: String,
    /// Where the example came from.
    pub source: ValueSource,
}

/// Controller for browsing, searching and inserting variables.
pub struct VariableCatalog<S, T> {
    registry: PlaceholderRegistry,
    store: S,
    search_term: String,
    debounced_search: String,
    search: Debouncer<String, T>,
    category: CategoryFilter,
    favorites: FavoriteSet,
    recent: RecentlyUsed,
}

impl<S: KeyValueStore, T: CancellableTimer> VariableCatalog<S, T> {
    /// Creates a catalog, loading favorites from `store`.
    ///
    /// Missing, corrupt or unreadable favorites yield an empty set.
    pub fn new(registry: PlaceholderRegistry, store: S, timer: T) -> Self {
        Self::with_debounce(registry, store, timer, SEARCH_DEBOUNCE)
    }

    /// Creates a catalog with a custom search quiet period.
    pub fn with_debounce(
        registry: PlaceholderRegistry,
        store: S,
        timer: T,
        delay: Duration,
    ) -> Self {
        let favorites = load_favorites(&store);
        Self {
            registry,
            store,
            search_term: String::new(),
            debounced_search: String::new(),
            search: Debouncer::new(timer, delay),
            category: CategoryFilter::All,
            favorites,
            recent: RecentlyUsed::new(),
        }
    }

    /// Updates the search box. The list follows after the quiet period.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.search.push(self.search_term.clone());
    }

    /// Applies the pending search term if its quiet period has elapsed.
    /// Returns true if the debounced term changed.
    pub fn poll_search(&mut self) -> bool {
        self.search
            .poll()
            .is_some_and(|term| self.apply_search(term))
    }

    /// Applies the pending search term immediately.
    /// Returns true if the debounced term changed.
    pub fn flush_search(&mut self) -> bool {
        self.search
            .flush()
            .is_some_and(|term| self.apply_search(term))
    }

    fn apply_search(&mut self, term: String) -> bool {
        if term == self.debounced_search {
            return false;
        }
        debug!(search = %term, "search applied");
        self.debounced_search = term;
        true
    }

    /// Selects a category, or `All`.
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.category = category.into();
    }

    /// The search box contents.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The search term the list is filtered by.
    #[must_use]
    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    /// The selected category.
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// The favorite names.
    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// The recently used names, most recent first.
    #[must_use]
    pub const fn recently_used(&self) -> &RecentlyUsed {
        &self.recent
    }

    /// The registry the catalog lists.
    #[must_use]
    pub const fn registry(&self) -> &PlaceholderRegistry {
        &self.registry
    }

    /// Every category in display order, with favorites and recents filled in.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        CategoryId::ALL
            .into_iter()
            .map(|id| match id {
                CategoryId::Favorites => Category::new(
                    id,
                    self.favorites
                        .iter()
                        .map(|name| self.lookup(name, FAVORITE_STAND_IN))
                        .collect(),
                ),
                CategoryId::Recent => Category::new(
                    id,
                    self.recent
                        .iter()
                        .map(|name| self.lookup(name, RECENT_STAND_IN))
                        .collect(),
                ),
                _ => self
                    .registry
                    .category(id)
                    .cloned()
                    .unwrap_or_else(|| Category::new(id, Vec::new())),
            })
            .collect()
    }

    fn lookup(&self, name: &str, stand_in: &str) -> Variable {
        self.registry
            .variable(name)
            .cloned()
            .unwrap_or_else(|| Variable::new(name, stand_in))
    }

    /// The filtered list of variables.
    ///
    /// Empty until a search term is applied or a category is selected.
    /// Otherwise rows follow category order, then declaration order, and a
    /// variable may appear once per category listing it.
    #[must_use]
    pub fn list_visible(&self) -> Vec<VisibleVariable> {
        if self.debounced_search.is_empty() && self.category == CategoryFilter::All {
            return Vec::new();
        }

        let needle = self.debounced_search.to_lowercase();
        let mut rows = Vec::new();
        for category in self.categories() {
            if !self.category.admits(category.id) {
                continue;
            }
            for variable in category.variables {
                if !needle.is_empty() && !matches_search(&variable, &needle) {
                    continue;
                }
                rows.push(VisibleVariable {
                    is_favorite: self.favorites.contains(&variable.name),
                    is_recent: self.recent.contains(&variable.name),
                    category: category.id,
                    variable,
                });
            }
        }
        rows
    }

    /// Inserts the variable's token into `buffer` and records it as recently
    /// used. Returns the new caret position if the buffer was mounted.
    pub fn select_variable<B>(&mut self, variable: &Variable, buffer: &mut B) -> Option<B::Position>
    where
        B: EditableBuffer + ?Sized,
    {
        let caret = insert_token(buffer, &variable.placeholder);
        self.record_use(&variable.name);
        caret
    }

    /// Records a name as recently used without inserting it.
    pub fn record_use(&mut self, name: &str) {
        self.recent.record(name);
    }

    /// Flips a favorite and persists the set.
    /// Returns true if the name is now a favorite.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let now_favorite = self.favorites.toggle(name);
        info!(name, favorite = now_favorite, "favorite toggled");
        self.persist_favorites();
        now_favorite
    }

    /// Removes every favorite and persists the empty set.
    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.persist_favorites();
    }

    /// Flips a favorite and persists the set, reporting a failed write.
    ///
    /// The toggle is kept in memory even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Storage`] if the set cannot be written.
    pub fn try_toggle_favorite(&mut self, name: &str) -> ApplicationResult<bool> {
        let now_favorite = self.favorites.toggle(name);
        info!(name, favorite = now_favorite, "favorite toggled");
        self.save_favorites()?;
        Ok(now_favorite)
    }

    /// Writes the favorites set to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Storage`] if the store rejects the write.
    pub fn save_favorites(&self) -> ApplicationResult<()> {
        self.store.set(FAVORITES_STORAGE_KEY, &self.favorites.to_json())?;
        Ok(())
    }

    fn persist_favorites(&self) {
        if let Err(e) = self.save_favorites() {
            warn!(error = %e, "failed to persist favorites");
        }
    }

    /// Builds the hover card for a name, resolving its example value.
    #[must_use]
    pub fn preview_variable<C: Clock>(
        &self,
        name: &str,
        resolver: &ValueResolver<C>,
    ) -> VariablePreview {
        let resolved = resolver.resolve_detailed(name);
        VariablePreview {
            variable: self.lookup(name, "Custom variable"),
            category: self.registry.category_of(name),
            example: resolved.value,
            source: resolved.source,
        }
    }
}

fn matches_search(variable: &Variable, needle: &str) -> bool {
    variable.name.to_lowercase().contains(needle)
        || variable.description.to_lowercase().contains(needle)
}

/// Reads the persisted favorites set.
///
/// # Errors
///
/// Returns [`ApplicationError::Storage`] if the store cannot be read and
/// [`ApplicationError::Domain`] if the stored value is not a JSON string list.
pub fn try_load_favorites<S: KeyValueStore>(store: &S) -> ApplicationResult<FavoriteSet> {
    match store.get(FAVORITES_STORAGE_KEY)? {
        Some(json) => Ok(FavoriteSet::from_json(&json)?),
        None => Ok(FavoriteSet::new()),
    }
}

fn load_favorites<S: KeyValueStore>(store: &S) -> FavoriteSet {
    try_load_favorites(store).unwrap_or_else(|e| {
        match e {
            ApplicationError::Domain(e) => {
                warn!(error = %e, "stored favorites are corrupt, starting empty");
            }
            ApplicationError::Storage(e) => {
                warn!(error = %e, "could not read favorites, starting empty");
            }
        }
        FavoriteSet::new()
    })
}
