use crate::header::{HEADER_SECTIONS, HeaderSpec};
use crate::table::TableRegion;

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T> ListOverride<T> {
    /// Convert the held values, keeping the override mode. Stops at the
    /// first error.
    pub fn try_map<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<ListOverride<U>, E> {
        Ok(match self {
            ListOverride::Default => ListOverride::Default,
            ListOverride::Replace(v) => {
                ListOverride::Replace(v.into_iter().map(f).collect::<Result<_, _>>()?)
            }
            ListOverride::Extend(v) => {
                ListOverride::Extend(v.into_iter().map(f).collect::<Result<_, _>>()?)
            }
        })
    }
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults. Extensions come
    /// after the defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => defaults.iter().chain(v).cloned().collect(),
        }
    }
}

/// Configuration for the syllabus extraction pipeline.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    /// Tables to locate, in output order.
    pub(crate) table_regions: Vec<TableRegion>,
    /// Front-matter sections to extract.
    pub(crate) header_sections: Vec<HeaderSpec>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            table_regions: TableRegion::semesters(),
            header_sections: HEADER_SECTIONS.to_vec(),
        }
    }
}

impl ParsingConfig {
    pub fn table_regions(&self) -> &[TableRegion] {
        &self.table_regions
    }

    pub fn header_sections(&self) -> &[HeaderSpec] {
        &self.header_sections
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    regions: ListOverride<RegionPatterns>,
}

#[derive(Debug, Clone)]
struct RegionPatterns {
    label: String,
    title: String,
    terminator: String,
    row: String,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default semester tables with `regions`, given as
    /// `(label, title, terminator, row)` patterns.
    pub fn replace_table_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S, S)>,
        S: Into<String>,
    {
        self.regions = ListOverride::Replace(collect_regions(regions));
        self
    }

    /// Locate these tables in addition to the semester tables.
    pub fn extend_table_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S, S)>,
        S: Into<String>,
    {
        self.regions = ListOverride::Extend(collect_regions(regions));
        self
    }

    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let table_regions = self
            .regions
            .try_map(|p| TableRegion::new(p.label, &p.title, &p.terminator, &p.row))?
            .resolve(&TableRegion::semesters());

        Ok(ParsingConfig {
            table_regions,
            ..ParsingConfig::default()
        })
    }
}

fn collect_regions<I, S>(regions: I) -> Vec<RegionPatterns>
where
    I: IntoIterator<Item = (S, S, S, S)>,
    S: Into<String>,
{
    regions
        .into_iter()
        .map(|(label, title, terminator, row)| RegionPatterns {
            label: label.into(),
            title: title.into(),
            terminator: terminator.into(),
            row: row.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_semesters_and_headers() {
        let config = ParsingConfig::default();
        assert_eq!(config.table_regions().len(), 8);
        assert_eq!(config.header_sections().len(), 5);
    }

    #[test]
    fn test_extend_regions_appends() {
        let config = ParsingConfigBuilder::new()
            .extend_table_regions([("ELECTIVES", "ELECTIVES", "TOTAL", r"(?P<number>\w+)")])
            .build()
            .unwrap();
        assert_eq!(config.table_regions().len(), 9);
        assert_eq!(config.table_regions()[8].label, "ELECTIVES");
    }

    #[test]
    fn test_replace_regions() {
        let config = ParsingConfigBuilder::new()
            .replace_table_regions([("YEAR 1", "YEAR 1", "TOTAL", r"(?P<number>\w+)")])
            .build()
            .unwrap();
        assert_eq!(config.table_regions().len(), 1);
    }

    #[test]
    fn test_try_map_keeps_mode() {
        let doubled: ListOverride<i32> = ListOverride::Extend(vec![1, 2])
            .try_map(|n| Ok::<_, ()>(n * 2))
            .unwrap();
        assert_eq!(doubled.resolve(&[0]), [0, 2, 4]);

        let untouched: ListOverride<i32> = ListOverride::<i32>::Default
            .try_map(|_| Err("never called"))
            .unwrap();
        assert_eq!(untouched.resolve(&[7]), [7]);

        let failed = ListOverride::Replace(vec![1, -1, 3])
            .try_map(|n| if n < 0 { Err(n) } else { Ok(n) });
        assert!(matches!(failed, Err(-1)));
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let result = ParsingConfigBuilder::new()
            .replace_table_regions([("BAD", "(", "TOTAL", "x")])
            .build();
        assert!(result.is_err());
    }
}
