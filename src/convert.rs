//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::config::*;

use vintage_grid::{PolicyTable, RevisionPolicy};
use vintage_io::{Compression, WriterConfig};
use vintage_panel::{AssembleOptions, GeographyMap, MissingVintage};
use vintage_release::Publication;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Applies TOML overrides on top of a publication's built-in policy.
pub fn apply_policy_overrides(
    publication: Publication,
    overrides: &PolicyToml,
) -> Result<RevisionPolicy> {
    let policy = match RevisionPolicy::for_publication(publication) {
        RevisionPolicy::AnnualBenchmark {
            max_revision,
            anchor_month,
        } => {
            if overrides.first_quarter_max.is_some() {
                bail!("[policy.{publication}]: first_quarter_max applies only to quarterly series");
            }
            let max_revision = overrides.max_revision.unwrap_or(max_revision);
            let anchor_month = overrides.anchor_month.unwrap_or(anchor_month);
            match overrides.horizons {
                Some(horizons) => RevisionPolicy::RollingBenchmark {
                    max_revision,
                    anchor_month,
                    horizons,
                },
                None => RevisionPolicy::AnnualBenchmark {
                    max_revision,
                    anchor_month,
                },
            }
        }
        RevisionPolicy::RollingBenchmark {
            max_revision,
            anchor_month,
            horizons,
        } => {
            if overrides.first_quarter_max.is_some() {
                bail!("[policy.{publication}]: first_quarter_max applies only to quarterly series");
            }
            RevisionPolicy::RollingBenchmark {
                max_revision: overrides.max_revision.unwrap_or(max_revision),
                anchor_month: overrides.anchor_month.unwrap_or(anchor_month),
                horizons: overrides.horizons.unwrap_or(horizons),
            }
        }
        RevisionPolicy::Quarterly { first_quarter_max } => {
            if overrides.max_revision.is_some()
                || overrides.anchor_month.is_some()
                || overrides.horizons.is_some()
            {
                bail!("[policy.{publication}]: quarterly series accept only first_quarter_max");
            }
            RevisionPolicy::Quarterly {
                first_quarter_max: overrides.first_quarter_max.unwrap_or(first_quarter_max),
            }
        }
    };
    policy.validate(publication)?;
    Ok(policy)
}

/// Builds the [`PolicyTable`]: built-in policies with TOML overrides applied.
pub fn build_policy_table(policy: &PolicyOverrides) -> Result<PolicyTable> {
    let mut table = PolicyTable::default();
    for (publication, overrides) in [
        (Publication::Ces, &policy.ces),
        (Publication::Sae, &policy.sae),
        (Publication::Qcew, &policy.qcew),
    ] {
        if let Some(overrides) = overrides {
            table = table.with_policy(publication, apply_policy_overrides(publication, overrides)?);
        }
    }
    Ok(table)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    let cfg = WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds [`AssembleOptions`] from the TOML panel configuration.
pub fn build_assemble_options(panel: &PanelToml) -> AssembleOptions {
    let missing = if panel.keep_missing_vintage {
        MissingVintage::Keep
    } else {
        MissingVintage::Drop
    };
    AssembleOptions::new().with_missing_vintage(missing)
}

/// Applies `[panel.geography_overrides]` on top of the lookup file.
///
/// Returns `None` only when there is neither a lookup nor an override, in
/// which case no aggregates are built.
pub fn apply_geography_overrides(
    map: Option<GeographyMap>,
    overrides: &BTreeMap<String, GeographyOverrideToml>,
) -> Option<GeographyMap> {
    if map.is_none() && overrides.is_empty() {
        return None;
    }
    let mut map = map.unwrap_or_default();
    for (fips, parents) in overrides {
        map.insert(
            format!("{fips:0>2}"),
            parents.region.clone(),
            parents.division.clone(),
        );
    }
    Some(map)
}

/// Resolves the cutoff date: CLI flag, then config, then today's local date.
pub fn resolve_as_of(flag: Option<NaiveDate>, config: Option<NaiveDate>) -> NaiveDate {
    flag.or(config)
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert!(parse_compression("gzip").is_err());
    }

    #[test]
    fn horizons_make_ces_rolling() {
        let overrides = PolicyToml {
            horizons: Some(2),
            ..PolicyToml::default()
        };
        let policy = apply_policy_overrides(Publication::Ces, &overrides).unwrap();
        assert_eq!(
            policy,
            RevisionPolicy::RollingBenchmark {
                max_revision: 2,
                anchor_month: 1,
                horizons: 2
            }
        );
    }

    #[test]
    fn quarterly_rejects_monthly_keys() {
        let overrides = PolicyToml {
            anchor_month: Some(3),
            ..PolicyToml::default()
        };
        assert!(apply_policy_overrides(Publication::Qcew, &overrides).is_err());
    }

    #[test]
    fn invalid_anchor_month_is_config_error() {
        let overrides = PolicyToml {
            anchor_month: Some(13),
            ..PolicyToml::default()
        };
        let err = apply_policy_overrides(Publication::Sae, &overrides).unwrap_err();
        assert!(err.to_string().contains("anchor_month"), "{err}");
    }

    #[test]
    fn policy_table_keeps_unset_defaults() {
        let policy = PolicyOverrides {
            qcew: Some(PolicyToml {
                first_quarter_max: Some(3),
                ..PolicyToml::default()
            }),
            ..PolicyOverrides::default()
        };
        let table = build_policy_table(&policy).unwrap();
        assert_eq!(
            table.get(Publication::Qcew),
            Some(&RevisionPolicy::Quarterly {
                first_quarter_max: 3
            })
        );
        assert_eq!(table.get(Publication::Ces), Some(&RevisionPolicy::ces()));
    }

    #[test]
    fn zero_row_group_rejected() {
        let io = IoConfig {
            row_group_size: 0,
            ..IoConfig::default()
        };
        assert!(build_writer_config(&io).is_err());
    }

    #[test]
    fn as_of_precedence() {
        let flag = Some(ymd(2024, 1, 1));
        let config = Some(ymd(2023, 1, 1));
        assert_eq!(resolve_as_of(flag, config), ymd(2024, 1, 1));
        assert_eq!(resolve_as_of(None, config), ymd(2023, 1, 1));
    }

    #[test]
    fn missing_vintage_option() {
        let keep = build_assemble_options(&PanelToml {
            keep_missing_vintage: true,
            ..PanelToml::default()
        });
        assert_eq!(keep.missing_vintage(), MissingVintage::Keep);
        assert_eq!(
            build_assemble_options(&PanelToml::default()).missing_vintage(),
            MissingVintage::Drop
        );
    }

    #[test]
    fn geography_overrides_fill_blank_codes() {
        use vintage_panel::GeographicType;

        let lookup = GeographyMap::new()
            .with_state("01", "3", "06")
            .with_state("72", "", "");
        let overrides = BTreeMap::from([(
            "72".to_string(),
            GeographyOverrideToml {
                region: "3".to_string(),
                division: "05".to_string(),
            },
        )]);
        let map = apply_geography_overrides(Some(lookup), &overrides).unwrap();
        assert_eq!(map.parent("72", GeographicType::Region), Some("3"));
        assert_eq!(map.parent("72", GeographicType::Division), Some("05"));
        assert_eq!(map.parent("01", GeographicType::Division), Some("06"));

        assert!(apply_geography_overrides(None, &BTreeMap::new()).is_none());
        let only = apply_geography_overrides(None, &overrides).unwrap();
        assert_eq!(only.len(), 1);
    }
}
