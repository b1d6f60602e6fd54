//! Main menu and its actions.

use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use cinedex_core::film::FilmId;
use cinedex_core::listing::{available_genres, available_ratings, genre_breakdown, rating_breakdown};
use cinedex_core::{save_films, CatalogError, Film, FilmFilter, Operation, SortOrder};

use crate::builder::{build_film, parse_name, parse_rating, parse_year};
use crate::paths::resolve_path;
use crate::prompt::{is_eof, Prompter};
use crate::render::{bar_chart, carousel_card, film_details, film_summary, page_count, table_page};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ViewAll,
    AddCustom,
    EditRating,
    Delete,
    Table,
    Charts,
    Carousel,
    ViewOne,
    Recommendations,
    RefreshNow,
    AddByTitle,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 12] = [
        MenuItem::ViewAll,
        MenuItem::AddCustom,
        MenuItem::EditRating,
        MenuItem::Delete,
        MenuItem::Table,
        MenuItem::Charts,
        MenuItem::Carousel,
        MenuItem::ViewOne,
        MenuItem::Recommendations,
        MenuItem::RefreshNow,
        MenuItem::AddByTitle,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::ViewAll => "View all films",
            MenuItem::AddCustom => "Add your own film",
            MenuItem::EditRating => "Edit a film's rating",
            MenuItem::Delete => "Delete a film",
            MenuItem::Table => "Table view",
            MenuItem::Charts => "Genre and rating charts",
            MenuItem::Carousel => "Poster carousel",
            MenuItem::ViewOne => "View a film",
            MenuItem::Recommendations => "Recommendations",
            MenuItem::RefreshNow => "Refresh from OMDb now",
            MenuItem::AddByTitle => "Add a film by title",
            MenuItem::Quit => "Save and quit",
        }
    }

    /// Item by its 1-based menu number.
    pub fn from_choice(input: &str) -> Option<Self> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

pub fn menu_text() -> String {
    let mut lines = vec![String::new(), "Main menu:".to_string()];
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        lines.push(format!("{:>3}. {}", i + 1, item.label()));
    }
    lines.join("\n")
}

pub fn parse_id(input: &str) -> Result<FilmId, String> {
    input
        .parse::<FilmId>()
        .map_err(|_| "Enter a film id (a non-negative number)".to_string())
}

/// 1-based choice into a 0-based index below `len`.
pub fn parse_index(input: &str, len: usize) -> Result<usize, String> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|i| *i < len)
        .ok_or_else(|| format!("Enter a number from 1 to {}", len))
}

enum Flow {
    Continue,
    Quit,
}

/// An interactive session over one catalog.
pub struct Session<R, W> {
    state: AppState,
    io: Prompter<R, W>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: AppState, io: Prompter<R, W>) -> Self {
        Self { state, io }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn prompter(&self) -> &Prompter<R, W> {
        &self.io
    }

    /// Run the menu until the user quits or closes the input.
    ///
    /// The catalog is saved on the way out in both cases.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.io.say(&menu_text()).await?;
            let result = match self.io.ask("Choose an option:").await {
                Ok(choice) => match MenuItem::from_choice(&choice) {
                    Some(item) => self.dispatch(item).await,
                    None => self.io.say("Invalid choice.").await.map(|_| Flow::Continue),
                },
                Err(e) => Err(e),
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return self.save_interactive().await,
                Err(e) if is_eof(&e) => {
                    info!("Input closed, saving catalog");
                    return self.save_once().await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn dispatch(&mut self, item: MenuItem) -> io::Result<Flow> {
        match item {
            MenuItem::ViewAll => self.view_all().await?,
            MenuItem::AddCustom => self.add_custom().await?,
            MenuItem::EditRating => self.edit_rating().await?,
            MenuItem::Delete => self.delete().await?,
            MenuItem::Table => self.table_view().await?,
            MenuItem::Charts => self.charts().await?,
            MenuItem::Carousel => self.carousel().await?,
            MenuItem::ViewOne => self.view_one().await?,
            MenuItem::Recommendations => self.recommendations().await?,
            MenuItem::RefreshNow => self.refresh_now().await?,
            MenuItem::AddByTitle => self.add_by_title().await?,
            MenuItem::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn list(&mut self, films: &[Film]) -> io::Result<()> {
        if films.is_empty() {
            return self.io.say("No films.").await;
        }
        for film in films {
            self.io.say(&film_summary(film)).await?;
        }
        Ok(())
    }

    async fn view_all(&mut self) -> io::Result<()> {
        let films = self.state.catalog().all().await;
        self.io.say("Film catalog:").await?;
        self.list(&films).await
    }

    async fn add_custom(&mut self) -> io::Result<()> {
        let film = build_film(&mut self.io).await?;
        match self.state.catalog().add_custom(film).await {
            Ok(id) => self.io.say(&format!("Added as #{}.", id)).await,
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    /// Ask for an id and fetch that film, reporting a miss to the user.
    async fn pick_film(&mut self) -> io::Result<Option<Film>> {
        let id = self.io.ask_with("Film id:", parse_id).await?;
        match self.state.catalog().get(id).await {
            Ok(film) => Ok(Some(film)),
            Err(e) => {
                self.io.say(&e.to_string()).await?;
                Ok(None)
            }
        }
    }

    async fn edit_rating(&mut self) -> io::Result<()> {
        let Some(mut film) = self.pick_film().await? else {
            return Ok(());
        };
        self.io.say(&film_summary(&film)).await?;
        let rating = self.io.ask_with("New rating (1-10):", parse_rating).await?;
        if let Err(e) = film.set_rating(i64::from(rating.value())) {
            return self.io.say(&e.to_string()).await;
        }
        match self.state.catalog().edit(film).await {
            Ok(()) => self.io.say("Rating updated.").await,
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    async fn delete(&mut self) -> io::Result<()> {
        let id = self.io.ask_with("Film id:", parse_id).await?;
        match self.state.catalog().delete(id).await {
            Ok(film) => self.io.say(&format!("Deleted '{}'.", film.name())).await,
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    async fn table_view(&mut self) -> io::Result<()> {
        let mut page = 0;
        loop {
            let snapshot = self.state.catalog().all().await;
            let view = self.state.operations.apply(snapshot.clone());
            page = page.min(page_count(view.len()) - 1);

            let operations = self.operations_text();
            self.io.say(&table_page(&view, page)).await?;
            self.io.say(&operations).await?;

            let command = self
                .io
                .ask("[n]ext, [p]rev, [f]ilter, [s]ort, [r]emove operation, [c]lear, [b]ack:")
                .await?;
            match command.to_lowercase().as_str() {
                "n" => page = (page + 1).min(page_count(view.len()) - 1),
                "p" => page = page.saturating_sub(1),
                "f" => {
                    if let Some(op) = self.choose_filter(&snapshot).await? {
                        self.state.operations.add(op);
                        page = 0;
                    }
                }
                "s" => {
                    let op = self.choose_sort().await?;
                    self.state.operations.add(op);
                    page = 0;
                }
                "r" => self.remove_operation().await?,
                "c" => self.state.operations.clear(),
                "b" => return Ok(()),
                _ => self.io.say("Unknown command.").await?,
            }
        }
    }

    fn operations_text(&self) -> String {
        let ops = self.state.operations.operations();
        if ops.is_empty() {
            return "Operations: none".to_string();
        }
        let mut lines = vec!["Operations:".to_string()];
        for (i, op) in ops.iter().enumerate() {
            lines.push(format!("{:>3}. {}", i + 1, op));
        }
        lines.join("\n")
    }

    async fn choose_filter(&mut self, snapshot: &[Film]) -> io::Result<Option<Operation>> {
        self.io.say("  1. All\n  2. By genre\n  3. By rating").await?;
        let kind = self.io.ask_with("Filter:", |s| parse_index(s, 3)).await?;
        let filter = match kind {
            0 => FilmFilter::All,
            1 => {
                let genres = available_genres(snapshot);
                if genres.is_empty() {
                    self.io.say("No genres to filter by.").await?;
                    return Ok(None);
                }
                let labels: Vec<String> = genres.iter().map(ToString::to_string).collect();
                let i = self.choose_from("Genre:", &labels).await?;
                FilmFilter::Genre(genres[i])
            }
            _ => {
                let ratings = available_ratings(snapshot);
                if ratings.is_empty() {
                    self.io.say("No ratings to filter by.").await?;
                    return Ok(None);
                }
                let labels: Vec<String> = ratings.iter().map(ToString::to_string).collect();
                let i = self.choose_from("Rating:", &labels).await?;
                FilmFilter::Rating(ratings[i])
            }
        };
        Ok(Some(Operation::Filter(filter)))
    }

    async fn choose_sort(&mut self) -> io::Result<Operation> {
        let orders = [
            SortOrder::None,
            SortOrder::RatingAscending,
            SortOrder::RatingDescending,
        ];
        let labels: Vec<String> = orders
            .iter()
            .map(|o| Operation::Sort(*o).name())
            .collect();
        let i = self.choose_from("Sort:", &labels).await?;
        Ok(Operation::Sort(orders[i]))
    }

    async fn choose_from(&mut self, label: &str, choices: &[String]) -> io::Result<usize> {
        let listing: Vec<String> = choices
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:>3}. {}", i + 1, c))
            .collect();
        self.io.say(&listing.join("\n")).await?;
        let len = choices.len();
        self.io.ask_with(label, |s| parse_index(s, len)).await
    }

    async fn remove_operation(&mut self) -> io::Result<()> {
        let answer = self.io.ask("Operation number to remove:").await?;
        let Some(index) = answer.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            return self.io.say("Enter an operation number.").await;
        };
        match self.state.operations.remove(index) {
            Ok(op) => self.io.say(&format!("Removed '{}'.", op)).await,
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    async fn charts(&mut self) -> io::Result<()> {
        let films = self.state.catalog().all().await;
        let genres: Vec<(String, usize)> = genre_breakdown(&films)
            .into_iter()
            .map(|(g, c)| (g.to_string(), c))
            .collect();
        let ratings: Vec<(String, usize)> = rating_breakdown(&films)
            .into_iter()
            .map(|(r, c)| (r.to_string(), c))
            .collect();
        self.io.say(&bar_chart("Films by genre:", &genres)).await?;
        self.io.say(&bar_chart("Films by rating:", &ratings)).await
    }

    async fn carousel(&mut self) -> io::Result<()> {
        let films = self.state.catalog().all().await;
        if films.is_empty() {
            return self.io.say("No films.").await;
        }
        let mut index = 0;
        loop {
            self.io
                .say(&carousel_card(&films[index], index, films.len()))
                .await?;
            match self.io.ask("[n]ext, [p]rev, [b]ack:").await?.to_lowercase().as_str() {
                "n" => index = (index + 1) % films.len(),
                "p" => index = (index + films.len() - 1) % films.len(),
                "b" => return Ok(()),
                _ => self.io.say("Unknown command.").await?,
            }
        }
    }

    async fn view_one(&mut self) -> io::Result<()> {
        let Some(film) = self.pick_film().await? else {
            return Ok(());
        };
        self.state.interest.record(film.genre);
        self.io.say(&film_details(&film)).await
    }

    async fn recommendations(&mut self) -> io::Result<()> {
        if self.state.interest.is_empty() {
            self.io
                .say("Nothing viewed yet, showing the whole catalog.")
                .await?;
            return self.view_all().await;
        }
        let settings = &self.state.config().recommendations;
        let (top, limit) = (settings.top_genres, settings.limit);
        let genres = self.state.interest.top(top);
        let films = self.state.catalog().recommend(&genres, limit).await;

        let names: Vec<String> = genres.iter().map(ToString::to_string).collect();
        self.io
            .say(&format!("Recommended from: {}", names.join(", ")))
            .await?;
        self.list(&films).await
    }

    async fn refresh_now(&mut self) -> io::Result<()> {
        self.io.say("Refreshing...").await?;
        match self.state.catalog().refresh().await {
            Ok(report) => {
                self.io
                    .say(&format!(
                        "{} refreshed, {} dropped.",
                        report.refreshed, report.dropped
                    ))
                    .await
            }
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    async fn add_by_title(&mut self) -> io::Result<()> {
        let title = self.io.ask_with("Title:", parse_name).await?;
        let year = self.io.ask_with("Release year:", parse_year).await?;
        let Ok(year) = i32::try_from(year) else {
            return self.io.say("Year out of range.").await;
        };
        match self.state.catalog().add_from_provider(&title, year).await {
            Ok(id) => match self.state.catalog().get(id).await {
                Ok(film) => self.io.say(&format!("Added {}", film_summary(&film))).await,
                Err(e) => self.io.say(&e.to_string()).await,
            },
            Err(CatalogError::ExternalService(e)) if e.is_not_found() => {
                self.io
                    .say(&format!("No film called '{}' from {} was found.", title, year))
                    .await
            }
            Err(e) => self.io.say(&e.to_string()).await,
        }
    }

    /// Try to save once; used when there is nobody left to ask.
    async fn save_once(&mut self) -> io::Result<()> {
        let films = self.state.catalog().all().await;
        let path = self.state.catalog_path().to_path_buf();
        if let Err(e) = save_films(&path, &films).await {
            warn!("Catalog not saved: {}", e);
        }
        Ok(())
    }

    /// Save, letting the user retry or pick another path on failure.
    async fn save_interactive(&mut self) -> io::Result<()> {
        loop {
            let films = self.state.catalog().all().await;
            let path = self.state.catalog_path().to_path_buf();
            match save_films(&path, &films).await {
                Ok(()) => {
                    return self
                        .io
                        .say(&format!("Saved {} films to {}.", films.len(), path.display()))
                        .await;
                }
                Err(e) => {
                    warn!("Catalog not saved: {}", e);
                    self.io.say(&format!("Could not save: {}", e)).await?;
                }
            }

            let choice = self
                .io
                .ask("[r]etry, save to another [p]ath, or [q]uit without saving:")
                .await?;
            match choice.to_lowercase().as_str() {
                "p" => {
                    let input = self.io.ask("New path:").await?;
                    match resolve_path(&input) {
                        Ok(path) => self.state.set_catalog_path(path),
                        Err(e) => self.io.say(&e.to_string()).await?,
                    }
                }
                "q" => return Ok(()),
                _ => {}
            }
        }
    }
}
