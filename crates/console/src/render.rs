//! Plain-text rendering of films, tables and charts.

use cinedex_core::Film;

/// Rows per table page.
pub const PAGE_SIZE: usize = 5;

const NAME_WIDTH: usize = 28;
const BAR_WIDTH: usize = 40;

/// One-line description.
pub fn film_summary(film: &Film) -> String {
    format!(
        "#{} {} ({}) - {}, rated {}",
        film.id,
        film.name(),
        film.release_year(),
        film.genre,
        film.rating()
    )
}

/// Multi-line description with every known field.
pub fn film_details(film: &Film) -> String {
    let mut lines = vec![
        format!("Id:          {}", film.id),
        format!("Name:        {}", film.name()),
        format!("Genre:       {}", film.genre),
        format!("Year:        {}", film.release_year()),
        format!("Rating:      {}", film.rating()),
    ];
    if let Some(director) = &film.director {
        lines.push(format!("Director:    {}", director));
    }
    if !film.actors.is_empty() {
        lines.push(format!("Actors:      {}", film.actors.join(", ")));
    }
    if let Some(plot) = &film.plot {
        lines.push(format!("Plot:        {}", plot));
    }
    if let Some(imdb) = &film.imdb_rating {
        lines.push(format!("IMDb:        {}", imdb));
    }
    if let Some(meta) = &film.metacritic_rating {
        lines.push(format!("Metacritic:  {}", meta));
    }
    if let Some(trailer) = &film.trailer_url {
        lines.push(format!("Trailer:     {}", trailer));
    }
    if let Some(poster) = &film.poster_path {
        lines.push(format!("Poster:      {}", poster));
    }
    lines.join("\n")
}

/// Number of pages needed for `len` rows; at least one.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Render page `page` (0-based, clamped) of `films` as a table.
pub fn table_page(films: &[Film], page: usize) -> String {
    let pages = page_count(films.len());
    let page = page.min(pages - 1);

    let mut out = vec![
        format!(
            "{:>5}  {:<w$}  {:<11}  {:>4}  {:>7}",
            "Id",
            "Name",
            "Genre",
            "Year",
            "Rating",
            w = NAME_WIDTH
        ),
        "-".repeat(5 + 2 + NAME_WIDTH + 2 + 11 + 2 + 4 + 2 + 7),
    ];
    for film in films.iter().skip(page * PAGE_SIZE).take(PAGE_SIZE) {
        out.push(format!(
            "{:>5}  {:<w$}  {:<11}  {:>4}  {:>7}",
            film.id,
            truncate(film.name(), NAME_WIDTH),
            film.genre.to_string(),
            film.release_year(),
            film.rating().to_string(),
            w = NAME_WIDTH
        ));
    }
    if films.is_empty() {
        out.push("(no films)".to_string());
    }
    out.push(format!("Page {}/{}", page + 1, pages));
    out.join("\n")
}

/// Horizontal bar chart of labelled counts.
pub fn bar_chart(title: &str, rows: &[(String, usize)]) -> String {
    let mut out = vec![title.to_string()];
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (label, count) in rows {
        let len = if max == 0 {
            0
        } else {
            (count * BAR_WIDTH).div_ceil(max)
        };
        out.push(format!(
            "  {:<w$}  {} {}",
            label,
            "#".repeat(len),
            count,
            w = label_width
        ));
    }
    if rows.is_empty() {
        out.push("  (no data)".to_string());
    }
    out.join("\n")
}

/// One carousel slide, 0-based `index` of `total`.
pub fn carousel_card(film: &Film, index: usize, total: usize) -> String {
    let poster = film.poster_path.as_deref().unwrap_or("(no poster)");
    format!(
        "[{}/{}]\n{}\nPoster: {}",
        index + 1,
        total,
        film_summary(film),
        poster
    )
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(width - 1).collect();
        t.push('~');
        t
    }
}
