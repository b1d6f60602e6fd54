//! Interactive construction of a custom film.

use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite};

use cinedex_core::film::{current_year, MIN_RELEASE_YEAR};
use cinedex_core::{Film, Genre, Rating};

use crate::prompt::Prompter;

pub fn parse_name(input: &str) -> Result<String, String> {
    if input.trim().is_empty() {
        Err("Name cannot be blank".to_string())
    } else {
        Ok(input.trim().to_string())
    }
}

/// Genre by its 1-based position in [`genre_menu`].
pub fn parse_genre_choice(input: &str) -> Result<Genre, String> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| Genre::ALL.get(i).copied())
        .ok_or_else(|| format!("Enter a number from 1 to {}", Genre::ALL.len()))
}

pub fn parse_year(input: &str) -> Result<i64, String> {
    let max = current_year();
    match input.parse::<i64>() {
        Ok(year) if (i64::from(MIN_RELEASE_YEAR)..=i64::from(max)).contains(&year) => Ok(year),
        _ => Err(format!(
            "Enter a year from {} to {}",
            MIN_RELEASE_YEAR, max
        )),
    }
}

pub fn parse_rating(input: &str) -> Result<Rating, String> {
    input
        .parse::<i64>()
        .map_err(|_| "Enter a whole number".to_string())
        .and_then(|n| Rating::new(n).map_err(|e| e.to_string()))
}

/// Comma-separated, trimmed, at least one name.
pub fn parse_actors(input: &str) -> Result<Vec<String>, String> {
    let actors: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    if actors.is_empty() {
        Err("Enter at least one actor".to_string())
    } else {
        Ok(actors)
    }
}

/// Numbered genre list.
pub fn genre_menu() -> String {
    Genre::ALL
        .iter()
        .enumerate()
        .map(|(i, g)| format!("{:>3}. {}", i + 1, g))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for every field, re-asking until each one is valid.
pub async fn build_film<R, W>(prompter: &mut Prompter<R, W>) -> io::Result<Film>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = prompter.ask_with("Name:", parse_name).await?;
    prompter.say(&genre_menu()).await?;
    let genre = prompter.ask_with("Genre number:", parse_genre_choice).await?;
    let year = prompter.ask_with("Release year:", parse_year).await?;
    let rating = prompter.ask_with("Rating (1-10):", parse_rating).await?;
    let director = prompter.ask("Director (optional):").await?;
    let actors = prompter.ask_with("Actors (comma-separated):", parse_actors).await?;

    let mut film = Film::new(name, genre, year, rating)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        .with_actors(actors);
    if !director.is_empty() {
        film = film.with_director(director);
    }
    Ok(film)
}
