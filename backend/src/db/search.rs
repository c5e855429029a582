//! Search predicate composition for pet queries.
//!
//! A [`PetSearch`] is an ordered list of [`SearchCriterion`] values. Each
//! criterion owns both its SQL fragment and the values bound to it, so the
//! placeholder order in [`PetSearch::to_sql`] always matches the bind list.
//!
//! Criteria are appended in a fixed order: species, minimum weight, maximum
//! weight. With no criteria the search returns every row.

use crate::models::{Pet, SearchPets};

/// A value bound to a search placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValue {
    Text(String),
    Weight(u32),
}

impl std::fmt::Display for SearchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchValue::Text(s) => write!(f, "'{}'", s),
            SearchValue::Weight(w) => write!(f, "{}", w),
        }
    }
}

/// One AND-ed search condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriterion {
    /// `species = ?`
    Species(String),
    /// `(male >= ? OR female >= ?)`
    MinWeight(u32),
    /// `(male <= ? OR female <= ?)`
    MaxWeight(u32),
}

impl SearchCriterion {
    /// SQL fragment with one `{}` slot per bound value.
    fn template(&self) -> &'static str {
        match self {
            SearchCriterion::Species(_) => "species = {}",
            SearchCriterion::MinWeight(_) => {
                "(average_male_adult_weight >= {} OR average_female_adult_weight >= {})"
            }
            SearchCriterion::MaxWeight(_) => {
                "(average_male_adult_weight <= {} OR average_female_adult_weight <= {})"
            }
        }
    }

    /// Values bound to this criterion, in placeholder order.
    pub fn binds(&self) -> Vec<SearchValue> {
        match self {
            SearchCriterion::Species(s) => vec![SearchValue::Text(s.clone())],
            SearchCriterion::MinWeight(w) | SearchCriterion::MaxWeight(w) => {
                vec![SearchValue::Weight(*w), SearchValue::Weight(*w)]
            }
        }
    }

    /// Render the fragment, numbering placeholders from `first_placeholder`.
    fn render(&self, first_placeholder: usize) -> String {
        let mut out = String::new();
        let mut next = first_placeholder;
        let mut pieces = self.template().split("{}").peekable();
        while let Some(piece) = pieces.next() {
            out.push_str(piece);
            if pieces.peek().is_some() {
                out.push_str(&format!("${}", next));
                next += 1;
            }
        }
        out
    }

    /// Evaluate the criterion against an in-memory record.
    pub fn matches(&self, pet: &Pet) -> bool {
        match self {
            SearchCriterion::Species(s) => pet.species == *s,
            SearchCriterion::MinWeight(w) => {
                pet.average_male_adult_weight >= *w || pet.average_female_adult_weight >= *w
            }
            SearchCriterion::MaxWeight(w) => {
                pet.average_male_adult_weight <= *w || pet.average_female_adult_weight <= *w
            }
        }
    }
}

/// Composed search over the `pets` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetSearch {
    criteria: Vec<SearchCriterion>,
}

impl PetSearch {
    /// A search with no criteria (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a criterion, AND-ed with the ones already present.
    pub fn and(mut self, criterion: SearchCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[SearchCriterion] {
        &self.criteria
    }

    pub fn is_unfiltered(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Render the `WHERE` clause with `$n` placeholders and the matching binds.
    pub fn to_sql(&self) -> (String, Vec<SearchValue>) {
        let mut sql = String::from("WHERE 1=1");
        let mut binds = Vec::new();
        for criterion in &self.criteria {
            sql.push_str(" AND ");
            sql.push_str(&criterion.render(binds.len() + 1));
            binds.extend(criterion.binds());
        }
        (sql, binds)
    }

    /// Whether `pet` satisfies every criterion.
    pub fn matches(&self, pet: &Pet) -> bool {
        self.criteria.iter().all(|c| c.matches(pet))
    }
}

impl From<&SearchPets> for PetSearch {
    fn from(request: &SearchPets) -> Self {
        let mut search = PetSearch::new();
        if !request.species.is_empty() {
            search = search.and(SearchCriterion::Species(request.species.clone()));
        }
        if request.min_weight > 0 {
            search = search.and(SearchCriterion::MinWeight(request.min_weight));
        }
        if request.max_weight > 0 {
            search = search.and(SearchCriterion::MaxWeight(request.max_weight));
        }
        search
    }
}

impl std::fmt::Display for PetSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sql, binds) = self.to_sql();
        let binds: Vec<String> = binds.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}]", sql, binds.join(", "))
    }
}
