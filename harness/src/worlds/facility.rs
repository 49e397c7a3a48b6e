//! `Facility`: generators and microchips carried between floors by an elevator.
//!
//! Each element contributes one generator and one compatible microchip. The
//! elevator starts on the first floor, carries one or two items per move,
//! and travels one floor per move. A floor is unsafe when it holds a
//! microchip without its own generator while any other generator is
//! present. The goal is every item on the top floor.
//!
//! The heuristic is `ceil(sum(floors below top, per item) / 2)`. One move
//! lowers the sum by at most 2, so the estimate never drops by more than one
//! per step and never overestimates.

use std::collections::BTreeSet;
use std::convert::Infallible;

use wayfinder_search::contract::SearchSpace;

use crate::contract::{WorldError, WorldV1};

/// Elevator floor plus the floor of every item.
///
/// `items[2 * e]` is element `e`'s generator, `items[2 * e + 1]` its
/// microchip. Floors are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacilityState {
    /// Floor the elevator is on.
    pub elevator: u8,
    /// Floor of each item.
    pub items: Vec<u8>,
}

/// A facility layout: element names and the number of floors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    elements: Vec<String>,
    floors: u8,
    start: FacilityState,
}

impl Facility {
    /// Parse one sentence per floor, bottom floor first.
    ///
    /// Recognizes `<element> generator` and `<element>-compatible microchip`;
    /// every other word is ignored, so `contains nothing relevant` is an
    /// empty floor.
    ///
    /// # Errors
    ///
    /// - [`WorldError::Parse`] on a microchip without the `-compatible`
    ///   qualifier, or an item with no element name before it.
    /// - [`WorldError::Invalid`] if an element lacks its generator or
    ///   microchip, has two of either, the text has no floors or more than
    ///   255, or the starting layout is unsafe.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let mut generators: Vec<(String, u8)> = Vec::new();
        let mut microchips: Vec<(String, u8)> = Vec::new();
        let mut elements: Vec<String> = Vec::new();

        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let floors = u8::try_from(lines.len()).map_err(|_| WorldError::Invalid {
            detail: format!("{} floors exceed the limit of 255", lines.len()),
        })?;
        if floors == 0 {
            return Err(WorldError::Invalid {
                detail: "no floors".into(),
            });
        }

        for (line, floor) in lines.iter().zip(0u8..) {
            let words: Vec<String> = line
                .split_whitespace()
                .map(|w| {
                    w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
                        .to_lowercase()
                })
                .collect();
            for (i, word) in words.iter().enumerate() {
                let is_generator = word == "generator";
                let is_microchip = word == "microchip";
                if !is_generator && !is_microchip {
                    continue;
                }
                let parse_error = |detail: String| WorldError::Parse {
                    line: usize::from(floor) + 1,
                    detail,
                };
                let Some(prev) = i.checked_sub(1).map(|p| words[p].as_str()) else {
                    return Err(parse_error(format!("'{word}' has no element")));
                };
                let name = if is_generator {
                    prev
                } else {
                    prev.strip_suffix("-compatible").ok_or_else(|| {
                        parse_error(format!("expected '<element>-compatible', got '{prev}'"))
                    })?
                };
                if name.is_empty() || name == "a" || name == "an" {
                    return Err(parse_error(format!("'{word}' has no element")));
                }
                if !elements.iter().any(|e| e == name) {
                    elements.push(name.to_owned());
                }
                let list = if is_generator {
                    &mut generators
                } else {
                    &mut microchips
                };
                list.push((name.to_owned(), floor));
            }
        }

        let mut items = Vec::with_capacity(elements.len() * 2);
        for name in &elements {
            items.push(single_floor(&generators, name, "generator")?);
            items.push(single_floor(&microchips, name, "microchip")?);
        }

        let facility = Self {
            elements,
            floors,
            start: FacilityState { elevator: 0, items },
        };
        if !facility.is_safe(&facility.start) {
            return Err(WorldError::Invalid {
                detail: "starting layout fries a microchip".into(),
            });
        }
        Ok(facility)
    }

    /// Add an element whose generator and microchip both start on `floor`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Invalid`] if the element already exists or
    /// `floor` does not.
    pub fn with_pair(mut self, name: &str, floor: u8) -> Result<Self, WorldError> {
        let name = name.to_lowercase();
        if self.elements.contains(&name) {
            return Err(WorldError::Invalid {
                detail: format!("element '{name}' already present"),
            });
        }
        if floor >= self.floors {
            return Err(WorldError::Invalid {
                detail: format!("floor {} outside 1..={}", u16::from(floor) + 1, self.floors),
            });
        }
        self.elements.push(name);
        self.start.items.extend([floor, floor]);
        Ok(self)
    }

    /// Element names, in first-mention order.
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Number of floors.
    #[must_use]
    pub fn floors(&self) -> u8 {
        self.floors
    }

    /// Whether no floor holds an unprotected microchip next to a generator.
    #[must_use]
    pub fn is_safe(&self, state: &FacilityState) -> bool {
        state.items.chunks_exact(2).all(|pair| {
            let (generator, chip) = (pair[0], pair[1]);
            generator == chip
                || !state
                    .items
                    .chunks_exact(2)
                    .any(|other| other[0] == chip)
        })
    }

    /// Whether every item is on the top floor.
    #[must_use]
    pub fn is_solved(&self, state: &FacilityState) -> bool {
        let top = self.floors - 1;
        state.items.iter().all(|&f| f == top)
    }

    /// Multi-line drawing, top floor first: `F<n>`, `E` on the elevator's
    /// floor, then one column per item.
    #[must_use]
    pub fn render(&self, state: &FacilityState) -> String {
        let labels = self.labels();
        let mut lines = Vec::with_capacity(usize::from(self.floors));
        for floor in (0..self.floors).rev() {
            let mut fields = vec![
                format!("F{}", u16::from(floor) + 1),
                if state.elevator == floor { "E" } else { "." }.to_owned(),
            ];
            for (label, &at) in labels.iter().zip(&state.items) {
                fields.push(if at == floor { label.clone() } else { ".".into() });
            }
            let line = fields
                .iter()
                .map(|f| format!("{f:<2}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(line.trim_end().to_owned());
        }
        lines.join("\n")
    }

    /// Item labels: one letter per element plus `G` or `M`.
    ///
    /// Each element takes the first letter of its name not already claimed
    /// by an earlier element, so polonium and promethium become `P` and `R`.
    /// A name with every letter claimed falls back to its full name and index.
    fn labels(&self) -> Vec<String> {
        let mut claimed: BTreeSet<String> = BTreeSet::new();
        let mut labels = Vec::with_capacity(self.elements.len() * 2);
        for (index, name) in self.elements.iter().enumerate() {
            let upper = name.to_uppercase();
            let abbrev = upper
                .chars()
                .map(String::from)
                .find(|c| !claimed.contains(c))
                .unwrap_or_else(|| format!("{upper}{index}"));
            labels.push(format!("{abbrev}G"));
            labels.push(format!("{abbrev}M"));
            claimed.insert(abbrev);
        }
        labels
    }
}

fn single_floor(list: &[(String, u8)], name: &str, kind: &str) -> Result<u8, WorldError> {
    let mut found = list.iter().filter(|(n, _)| n == name).map(|&(_, f)| f);
    match (found.next(), found.next()) {
        (Some(floor), None) => Ok(floor),
        (None, _) => Err(WorldError::Invalid {
            detail: format!("'{name}' has no {kind}"),
        }),
        (Some(_), Some(_)) => Err(WorldError::Invalid {
            detail: format!("'{name}' has more than one {kind}"),
        }),
    }
}

impl SearchSpace for Facility {
    type State = FacilityState;
    type Error = Infallible;

    fn heuristic(&self, state: &FacilityState) -> Result<u64, Infallible> {
        let top = self.floors - 1;
        let below: u64 = state.items.iter().map(|&f| u64::from(top - f)).sum();
        Ok(below.div_ceil(2))
    }

    /// Up before down; single items before pairs, each in item order.
    fn neighbors(&self, state: &FacilityState) -> Result<Vec<FacilityState>, Infallible> {
        let here: Vec<usize> = state
            .items
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f == state.elevator)
            .map(|(i, _)| i)
            .collect();

        let mut loads: Vec<Vec<usize>> = here.iter().map(|&i| vec![i]).collect();
        for (n, &a) in here.iter().enumerate() {
            for &b in &here[n + 1..] {
                loads.push(vec![a, b]);
            }
        }

        let targets = [
            state.elevator.checked_add(1).filter(|&f| f < self.floors),
            state.elevator.checked_sub(1),
        ];

        let mut out = Vec::new();
        for target in targets.into_iter().flatten() {
            for load in &loads {
                let mut next = state.clone();
                next.elevator = target;
                for &i in load {
                    next.items[i] = target;
                }
                if self.is_safe(&next) {
                    out.push(next);
                }
            }
        }
        Ok(out)
    }
}

impl WorldV1 for Facility {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "facility"
    }

    fn start(&self) -> FacilityState {
        self.start.clone()
    }

    /// `E<n>` then each floor's items, bottom first: `E1 F1:HM,LM F2:HG F3:LG F4:-`.
    fn describe(&self, state: &FacilityState) -> String {
        let labels = self.labels();
        let mut out = format!("E{}", u16::from(state.elevator) + 1);
        for floor in 0..self.floors {
            let here: Vec<&str> = labels
                .iter()
                .zip(&state.items)
                .filter(|&(_, &f)| f == floor)
                .map(|(l, _)| l.as_str())
                .collect();
            let listed = if here.is_empty() {
                "-".to_owned()
            } else {
                here.join(",")
            };
            out.push_str(&format!(" F{}:{listed}", u16::from(floor) + 1));
        }
        out
    }
}
