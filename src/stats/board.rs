//! Board Calculator Module
//! Bed availability, specialty counts, doctor load and triage classification
//! over a loaded ward snapshot.

use crate::data::{PatientRecord, Ward};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Inclusive range of valid bed identifiers for the ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BedRange {
    pub low: i64,
    pub high: i64,
}

impl BedRange {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, bed: i64) -> bool {
        (self.low..=self.high).contains(&bed)
    }

    /// Number of beds in the range; zero when inverted, saturating when huge.
    pub fn capacity(&self) -> usize {
        if self.high < self.low {
            return 0;
        }
        self.high
            .checked_sub(self.low)
            .and_then(|span| usize::try_from(span).ok())
            .map_or(usize::MAX, |span| span.saturating_add(1))
    }

    pub fn beds(&self) -> impl Iterator<Item = i64> {
        self.low..=self.high
    }
}

/// Free and occupied beds of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedAvailability {
    /// Distinct in-range beds assigned to a patient row.
    pub occupied: BTreeSet<i64>,
    /// In-range beds with no patient, ascending.
    pub free: Vec<i64>,
    pub total_capacity: usize,
}

/// What the free-bed banner must report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedStatus<'a> {
    Available(&'a [i64]),
    Full,
}

impl BedAvailability {
    pub fn status(&self) -> BedStatus<'_> {
        if self.free.is_empty() {
            BedStatus::Full
        } else {
            BedStatus::Available(&self.free)
        }
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }
}

/// Display category for a patient row, derived from its triage colour text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageCategory {
    #[default]
    None,
    Green,
    Red,
    Yellow,
}

/// Substring of the triage field that selects a category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriageRule {
    pub pattern: String,
    pub category: TriageCategory,
}

/// Named specialty category matched by substring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecialtyCategory {
    pub label: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCount {
    pub doctor: String,
    pub count: usize,
}

/// Patient count per doctor, descending by count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorLoad {
    pub entries: Vec<DoctorCount>,
}

impl DoctorLoad {
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Upper bound of the load bars: busiest doctor plus headroom.
    pub fn display_scale(&self, headroom: usize) -> usize {
        self.max_count() + headroom
    }
}

/// Everything the board shows for one non-empty snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub total_patients: usize,
    pub categories: Vec<CategoryCount>,
    pub beds: BedAvailability,
    pub doctors: DoctorLoad,
}

/// Pure computations over ward records.
pub struct BoardCalculator;

impl BoardCalculator {
    /// Free beds are the range minus the distinct beds present.
    /// Records without a bed, or with one outside the range, occupy nothing.
    pub fn bed_availability(records: &[PatientRecord], range: BedRange) -> BedAvailability {
        let occupied: BTreeSet<i64> = records
            .iter()
            .filter_map(|r| r.bed)
            .filter(|b| range.contains(*b))
            .collect();

        let free = range.beds().filter(|b| !occupied.contains(b)).collect();

        BedAvailability {
            occupied,
            free,
            total_capacity: range.capacity(),
        }
    }

    /// Rows whose specialty contains `pattern`, ignoring case.
    pub fn specialty_count(records: &[PatientRecord], pattern: &str) -> usize {
        let pattern = pattern.to_uppercase();
        records
            .iter()
            .filter(|r| r.specialty.to_uppercase().contains(&pattern))
            .count()
    }

    pub fn specialty_counts(
        records: &[PatientRecord],
        categories: &[SpecialtyCategory],
    ) -> Vec<CategoryCount> {
        categories
            .iter()
            .map(|c| CategoryCount {
                label: c.label.clone(),
                count: Self::specialty_count(records, &c.pattern),
            })
            .collect()
    }

    /// Group rows by doctor. Ties keep first-seen order.
    pub fn doctor_load(records: &[PatientRecord]) -> DoctorLoad {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<DoctorCount> = Vec::new();

        for record in records {
            let doctor = record.doctor.trim();
            match index.get(doctor) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(doctor, entries.len());
                    entries.push(DoctorCount {
                        doctor: doctor.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        DoctorLoad { entries }
    }

    /// First rule whose pattern occurs in the triage field wins.
    pub fn triage_category(record: &PatientRecord, rules: &[TriageRule]) -> TriageCategory {
        let triage = record.triage_color.to_uppercase();
        rules
            .iter()
            .find(|rule| triage.contains(&rule.pattern.to_uppercase()))
            .map(|rule| rule.category)
            .unwrap_or_default()
    }

    /// Summary for the board, or `None` when there is no data to show.
    pub fn summarize(
        ward: &Ward,
        range: BedRange,
        categories: &[SpecialtyCategory],
    ) -> Option<BoardSummary> {
        if ward.is_empty() {
            return None;
        }

        Some(BoardSummary {
            total_patients: ward.len(),
            categories: Self::specialty_counts(&ward.records, categories),
            beds: Self::bed_availability(&ward.records, range),
            doctors: Self::doctor_load(&ward.records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bed(b: Option<i64>) -> PatientRecord {
        PatientRecord {
            bed: b,
            patient_name: "p".to_string(),
            ..Default::default()
        }
    }

    fn specialty(s: &str) -> PatientRecord {
        PatientRecord {
            specialty: s.to_string(),
            patient_name: "p".to_string(),
            ..Default::default()
        }
    }

    fn doctor(d: &str) -> PatientRecord {
        PatientRecord {
            doctor: d.to_string(),
            patient_name: "p".to_string(),
            ..Default::default()
        }
    }

    fn triage(t: &str) -> PatientRecord {
        PatientRecord {
            triage_color: t.to_string(),
            patient_name: "p".to_string(),
            ..Default::default()
        }
    }

    fn default_rules() -> Vec<TriageRule> {
        [
            ("VERDE", TriageCategory::Green),
            ("ROJO", TriageCategory::Red),
            ("AMARILLO", TriageCategory::Yellow),
        ]
        .into_iter()
        .map(|(p, c)| TriageRule {
            pattern: p.to_string(),
            category: c,
        })
        .collect()
    }

    #[test]
    fn test_capacity_of_extreme_ranges() {
        assert_eq!(BedRange::new(3, 1).capacity(), 0);
        assert_eq!(BedRange::new(621, 642).capacity(), 22);
        assert_eq!(BedRange::new(i64::MIN, i64::MAX).capacity(), usize::MAX);
    }

    #[test]
    fn test_free_beds_small_range() {
        let records = vec![bed(Some(2))];
        let availability = BoardCalculator::bed_availability(&records, BedRange::new(1, 3));

        assert_eq!(availability.free, vec![1, 3]);
        assert_eq!(availability.total_capacity, 3);
        assert_eq!(availability.status(), BedStatus::Available(&[1, 3]));
    }

    #[test]
    fn test_free_and_occupied_partition_range() {
        let range = BedRange::new(621, 642);
        let records = vec![
            bed(Some(640)),
            bed(Some(621)),
            bed(Some(621)),
            bed(None),
            bed(Some(700)),
            bed(Some(633)),
        ];
        let availability = BoardCalculator::bed_availability(&records, range);

        let free: BTreeSet<i64> = availability.free.iter().copied().collect();
        assert!(free.is_disjoint(&availability.occupied));
        let union: BTreeSet<i64> = free.union(&availability.occupied).copied().collect();
        let all: BTreeSet<i64> = range.beds().collect();
        assert_eq!(union, all);

        assert!(availability.free.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(availability.occupied.len(), 3);
        assert_eq!(availability.free.len(), 19);
    }

    #[test]
    fn test_full_ward_reports_full() {
        let records: Vec<PatientRecord> = (1..=3).map(|b| bed(Some(b))).collect();
        let availability = BoardCalculator::bed_availability(&records, BedRange::new(1, 3));

        assert!(availability.is_full());
        assert_eq!(availability.status(), BedStatus::Full);
    }

    #[test]
    fn test_bedless_row_excluded_from_occupied() {
        let records = vec![bed(None), bed(Some(1))];
        let availability = BoardCalculator::bed_availability(&records, BedRange::new(1, 2));
        assert_eq!(availability.occupied.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(availability.free, vec![2]);
    }

    #[test]
    fn test_specialty_count_is_case_insensitive() {
        let records = vec![specialty("HEM-A"), specialty("onc"), specialty("CARDIO")];
        assert_eq!(BoardCalculator::specialty_count(&records, "HEM"), 1);
        assert_eq!(BoardCalculator::specialty_count(&records, "ONC"), 1);
        assert_eq!(BoardCalculator::specialty_count(&records, "hem"), 1);
        assert_eq!(BoardCalculator::specialty_count(&records, "NEURO"), 0);
    }

    #[test]
    fn test_doctor_load_sorted_and_stable() {
        let records = vec![
            doctor("Dr B"),
            doctor("Dr A"),
            doctor("Dr C"),
            doctor("Dr A"),
            doctor(""),
        ];
        let load = BoardCalculator::doctor_load(&records);

        let order: Vec<(&str, usize)> = load
            .entries
            .iter()
            .map(|e| (e.doctor.as_str(), e.count))
            .collect();
        assert_eq!(order, vec![("Dr A", 2), ("Dr B", 1), ("Dr C", 1), ("", 1)]);
        assert_eq!(load.total(), records.len());
        assert_eq!(load.display_scale(2), 4);
    }

    #[test]
    fn test_triage_category() {
        let rules = default_rules();
        assert_eq!(
            BoardCalculator::triage_category(&triage("rojo leve"), &rules),
            TriageCategory::Red
        );
        assert_eq!(
            BoardCalculator::triage_category(&triage("Verde"), &rules),
            TriageCategory::Green
        );
        assert_eq!(
            BoardCalculator::triage_category(&triage("AMARILLO"), &rules),
            TriageCategory::Yellow
        );
        assert_eq!(
            BoardCalculator::triage_category(&triage(""), &rules),
            TriageCategory::None
        );
    }

    #[test]
    fn test_summarize_empty_ward_has_no_summary() {
        assert!(BoardCalculator::summarize(&Ward::empty(), BedRange::new(1, 3), &[]).is_none());
    }

    #[test]
    fn test_summarize_counts_categories() {
        let ward = Ward {
            records: vec![specialty("HEM"), specialty("ONC-2"), specialty("hem")],
            columns: Vec::new(),
        };
        let categories = vec![
            SpecialtyCategory {
                label: "Hematología (HEM)".to_string(),
                pattern: "HEM".to_string(),
            },
            SpecialtyCategory {
                label: "Oncología (ONC)".to_string(),
                pattern: "ONC".to_string(),
            },
        ];

        let summary = BoardCalculator::summarize(&ward, BedRange::new(1, 3), &categories)
            .expect("Should summarize");
        assert_eq!(summary.total_patients, 3);
        assert_eq!(summary.categories[0].count, 2);
        assert_eq!(summary.categories[1].count, 1);
        assert_eq!(summary.beds.free, vec![1, 2, 3]);
    }
}
