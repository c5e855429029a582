//! One-time bulk load of breed records from a comma-separated seed file.
//!
//! The file has a header line followed by rows of
//! `species,pet_size,name,male_weight,female_weight` (weights in grams).
//! Fields are not quoted; a comma always separates fields.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use super::repository::{ErrorContext, PetRepository, RepositoryError, RepositoryResult};
use crate::models::CreatePet;

const SEED_FIELDS: usize = 5;

/// Populate the store from `path` if, and only if, it is currently empty.
///
/// Returns the number of rows inserted. A non-empty store short-circuits to
/// `Ok(0)` without reading the file. The count and the insert are not
/// serialized against other writers, so two processes seeding an empty store
/// at the same moment can both insert.
pub async fn load_pets_table<P: AsRef<Path>>(
    repo: &dyn PetRepository,
    path: P,
) -> RepositoryResult<u64> {
    let existing = repo.count().await?;
    if existing != 0 {
        debug!("Pets table already holds {} rows, skipping seed load", existing);
        return Ok(0);
    }

    let path = path.as_ref();
    let rows = parse_seed_file(path).await?;
    info!("Loading {} pets from {}", rows.len(), path.display());
    repo.insert_many(&rows).await
}

/// Read and parse a seed file.
pub async fn parse_seed_file(path: &Path) -> RepositoryResult<Vec<CreatePet>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        RepositoryError::internal_with_context(
            format!("Failed to read seed file {}: {}", path.display(), e),
            ErrorContext::new("load_pets_table"),
        )
    })?;
    parse_seed_rows(&content)
}

/// Parse seed file content. The first line is a header and is skipped.
pub fn parse_seed_rows(content: &str) -> RepositoryResult<Vec<CreatePet>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| {
                let line = e.position().map_or(0, |p| p.line());
                invalid_row(line, e.to_string())
            })?;
            parse_record(&record)
        })
        .collect()
}

fn parse_record(record: &StringRecord) -> RepositoryResult<CreatePet> {
    let line = record.position().map_or(0, |p| p.line());
    if record.len() != SEED_FIELDS {
        return Err(invalid_row(
            line,
            format!("expected {} fields, found {}", SEED_FIELDS, record.len()),
        ));
    }

    Ok(CreatePet {
        species: record[0].to_string(),
        pet_size: record[1].to_string(),
        name: record[2].to_string(),
        average_male_adult_weight: parse_weight(line, &record[3])?,
        average_female_adult_weight: parse_weight(line, &record[4])?,
    })
}

fn parse_weight(line: u64, raw: &str) -> RepositoryResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid_row(line, format!("invalid weight '{}'", raw)))
}

fn invalid_row(line: u64, details: String) -> RepositoryError {
    RepositoryError::validation_with_context(
        format!("Malformed seed row at line {}", line),
        ErrorContext::new("load_pets_table").with_details(details),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::io::Write;

    const SEED: &str = "species,pet_size,name,male_weight,female_weight\r\n\
                        dog,large,German Shepherd,36000,29000\r\n\
                        cat,small,Siamese,4500,3500\r\n\
                        \r\n";

    fn seed_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_skips_header_and_blank_lines() {
        let rows = parse_seed_rows(SEED).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "German Shepherd");
        assert_eq!(rows[0].average_male_adult_weight, 36000);
        assert_eq!(rows[1].species, "cat");
        assert_eq!(rows[1].average_female_adult_weight, 3500);
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_seed_rows("species,pet_size,name,male_weight,female_weight")
            .unwrap()
            .is_empty());
        assert!(parse_seed_rows("").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_field_count_names_line() {
        let err = parse_seed_rows("header\ndog,large,Rex,1,2\ncat,small,Tom,3\n").unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_quotes_are_literal_text() {
        let err = parse_seed_rows("header\ndog,large,\"Rex, Jr\",1,2\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);

        let rows = parse_seed_rows("header\ndog,large,\"Rex\",1,2\n").unwrap();
        assert_eq!(rows[0].name, "\"Rex\"");
    }

    #[test]
    fn test_bad_weight_names_line() {
        let err = parse_seed_rows("header\ndog,large,Rex,heavy,2\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
        assert!(err.to_string().contains("heavy"), "{}", err);
    }

    #[tokio::test]
    async fn test_load_into_empty_store() {
        let file = seed_file(SEED);
        let repo = LocalRepository::new();
        assert_eq!(load_pets_table(&repo, file.path()).await.unwrap(), 2);
        assert_eq!(repo.pet_count(), 2);
    }

    #[tokio::test]
    async fn test_second_load_is_noop() {
        let file = seed_file(SEED);
        let repo = LocalRepository::new();
        load_pets_table(&repo, file.path()).await.unwrap();
        let before = repo.get_all().await.unwrap();

        assert_eq!(load_pets_table(&repo, file.path()).await.unwrap(), 0);
        assert_eq!(repo.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_non_empty_store_does_not_read_file() {
        let repo = LocalRepository::new();
        repo.insert_many(&parse_seed_rows(SEED).unwrap()).await.unwrap();
        let inserted = load_pets_table(&repo, "/nonexistent/breeds.csv")
            .await
            .unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let repo = LocalRepository::new();
        assert!(load_pets_table(&repo, "/nonexistent/breeds.csv")
            .await
            .is_err());
        assert_eq!(repo.pet_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_file_inserts_nothing() {
        let file = seed_file("header\ndog,large,Rex,1,2\nbroken\n");
        let repo = LocalRepository::new();
        assert!(load_pets_table(&repo, file.path()).await.is_err());
        assert_eq!(repo.pet_count(), 0);
    }
}
