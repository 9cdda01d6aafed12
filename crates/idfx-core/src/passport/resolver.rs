//! Deterministic choice among several valid candidates for one field.

/// A normalized candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub pattern_index: usize,
    pub offset: usize,
    /// Produced by a pattern that restates the field (e.g. the MRZ).
    pub confirming: bool,
}

/// The candidate chosen for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub chosen: Candidate,
    /// Candidates that competed, including the chosen one, in resolution order.
    pub competing: Vec<Candidate>,
}

impl Resolution {
    /// More than one candidate competed for the field.
    pub fn is_ambiguous(&self) -> bool {
        self.competing.len() > 1
    }
}

/// Pick the candidate from the earliest-priority pattern, then the earliest
/// position in the source text.
///
/// Every other candidate competes, except a restatement that repeats the
/// chosen value: an MRZ line agreeing with the printed field is not a conflict.
pub fn resolve(candidates: &[Candidate]) -> Option<Resolution> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by_key(|c| (c.pattern_index, c.offset));

    let chosen = ordered.first()?.clone();
    let competing: Vec<Candidate> = ordered
        .into_iter()
        .enumerate()
        .filter(|(i, c)| *i == 0 || !(c.confirming && c.value == chosen.value))
        .map(|(_, c)| c)
        .collect();

    Some(Resolution { chosen, competing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate(value: &str, pattern_index: usize, offset: usize) -> Candidate {
        Candidate {
            value: value.to_string(),
            pattern_index,
            offset,
            confirming: false,
        }
    }

    fn mrz(value: &str, pattern_index: usize, offset: usize) -> Candidate {
        Candidate {
            confirming: true,
            ..candidate(value, pattern_index, offset)
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn test_single_candidate() {
        let resolution = resolve(&[candidate("AB1234567", 0, 13)]).unwrap();
        assert_eq!(resolution.chosen.value, "AB1234567");
        assert!(!resolution.is_ambiguous());
    }

    #[test]
    fn test_priority_beats_position() {
        let resolution = resolve(&[
            mrz("MRZ12345", 2, 0),
            candidate("AB1234567", 0, 80),
        ])
        .unwrap();
        assert_eq!(resolution.chosen.value, "AB1234567");
        assert!(resolution.is_ambiguous());
    }

    #[test]
    fn test_position_breaks_tie() {
        let resolution = resolve(&[
            candidate("CD7654321", 0, 40),
            candidate("AB1234567", 0, 13),
        ])
        .unwrap();
        assert_eq!(resolution.chosen.value, "AB1234567");
        assert_eq!(resolution.competing.len(), 2);
    }

    #[test]
    fn test_repeated_printed_value_is_ambiguous() {
        let resolution = resolve(&[
            candidate("AB1234567", 0, 13),
            candidate("AB1234567", 0, 36),
        ])
        .unwrap();
        assert!(resolution.is_ambiguous());
    }

    #[test]
    fn test_agreeing_mrz_not_ambiguous() {
        let resolution = resolve(&[
            candidate("AB1234567", 0, 13),
            mrz("AB1234567", 2, 90),
        ])
        .unwrap();
        assert!(!resolution.is_ambiguous());
        assert_eq!(resolution.competing.len(), 1);
    }

    #[test]
    fn test_order_independent() {
        let a = [candidate("X1111", 1, 5), candidate("Y2222", 0, 50), candidate("Z3333", 0, 20)];
        let b = [a[2].clone(), a[0].clone(), a[1].clone()];
        assert_eq!(resolve(&a), resolve(&b));
    }
}
