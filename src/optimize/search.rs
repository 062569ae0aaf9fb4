use crate::Handle;
use crate::Score;
use crate::data::GameData;
use crate::inventory::OwnedRelic;
use crate::score::Scorer;
use crate::score::VesselState;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::time::Duration;
use std::time::Instant;

/// pre-scored candidate list for one free slot, sorted descending
pub(super) type Candidates<'a> = Vec<(Score, &'a OwnedRelic)>;

/// one solver assignment over the free slots: the relic (if any) and the
/// contextual score it earned during the walk
pub(super) type Assignment<'a> = Vec<(Option<&'a OwnedRelic>, Score)>;

fn handle_set(assignment: &Assignment) -> BTreeSet<Handle> {
    assignment
        .iter()
        .filter_map(|(relic, _)| relic.map(|r| r.handle))
        .collect()
}

fn empty_assignment<'a>(slots: usize) -> Assignment<'a> {
    vec![(None, 0); slots]
}

// ----------------------------------------------------------------------
// greedy
// ----------------------------------------------------------------------

/// one pass per requested result: walk slots left to right picking the
/// best-scoring remaining candidate under the accumulating state. after
/// each pass the pass's best relic is excluded from the next, forcing
/// result diversity; a duplicate handle set stops early.
pub(super) fn greedy_solve<'a>(
    scorer: &Scorer,
    data: &GameData,
    candidates: &[Candidates<'a>],
    top_n: usize,
) -> Vec<Assignment<'a>> {
    let slots = candidates.len();
    let mut results = Vec::new();
    let mut excluded: HashSet<Handle> = HashSet::new();
    let mut seen: HashSet<BTreeSet<Handle>> = HashSet::new();
    for _ in 0..top_n {
        let assignment = greedy_once(scorer, data, candidates, &excluded);
        let handles = handle_set(&assignment);
        if handles.is_empty() || !seen.insert(handles) {
            break;
        }
        let mut best: Option<(Score, Handle)> = None;
        for (relic, score) in &assignment {
            if let Some(relic) = relic {
                if best.map(|(s, _)| *score > s).unwrap_or(true) {
                    best = Some((*score, relic.handle));
                }
            }
        }
        results.push(assignment);
        if let Some((_, handle)) = best {
            excluded.insert(handle);
        }
    }
    if results.is_empty() {
        results.push(empty_assignment(slots));
    }
    results
}

fn greedy_once<'a>(
    scorer: &Scorer,
    data: &GameData,
    candidates: &[Candidates<'a>],
    excluded: &HashSet<Handle>,
) -> Assignment<'a> {
    let mut assignment = empty_assignment(candidates.len());
    let mut used = excluded.clone();
    let mut state = VesselState::default();
    for (slot, slot_candidates) in candidates.iter().enumerate() {
        let mut best: Option<(Score, &OwnedRelic)> = None;
        for (_, relic) in slot_candidates {
            if used.contains(&relic.handle) {
                continue;
            }
            let score = scorer.context_score(relic, &state);
            if best.map(|(s, _)| score > s).unwrap_or(true) {
                best = Some((score, relic));
            }
        }
        if let Some((score, relic)) = best {
            assignment[slot] = (Some(relic), score);
            used.insert(relic.handle);
            state.place(relic, data);
        }
    }
    assignment
}

// ----------------------------------------------------------------------
// branch and bound
// ----------------------------------------------------------------------

struct Backtracker<'s, 'a> {
    scorer: &'s Scorer<'s>,
    data: &'s GameData,
    candidates: &'s [Candidates<'a>],
    /// best later-slot pre-scores: suffix_best[i] bounds everything a
    /// partial assignment can still gain after slot i
    suffix_best: Vec<Score>,
    top_n: usize,
    deadline: Instant,
    top: Vec<(Score, Assignment<'a>)>,
    seen: HashSet<BTreeSet<Handle>>,
    threshold: Score,
}

/// depth-first over slots, trying "leave empty" then each candidate in
/// descending pre-score. two pruning tests per candidate: the optimistic
/// pre-score bound, then the tighter contextual bound. a wall-clock
/// deadline returns the best found so far.
pub(super) fn backtrack_solve<'a>(
    scorer: &Scorer,
    data: &GameData,
    candidates: &[Candidates<'a>],
    top_n: usize,
) -> Vec<Assignment<'a>> {
    let slots = candidates.len();
    let mut suffix_best = vec![0; slots + 1];
    for slot in (0..slots).rev() {
        let best = candidates[slot].first().map(|(score, _)| *score).unwrap_or(0);
        suffix_best[slot] = suffix_best[slot + 1] + best;
    }
    let mut search = Backtracker {
        scorer,
        data,
        candidates,
        suffix_best,
        top_n,
        deadline: Instant::now() + Duration::from_millis(crate::BACKTRACK_DEADLINE_MS),
        top: Vec::new(),
        seen: HashSet::new(),
        threshold: -1,
    };
    let mut current = empty_assignment(slots);
    let mut used = HashSet::new();
    let mut state = VesselState::default();
    search.recurse(0, &mut current, &mut used, &mut state, 0);
    if search.top.is_empty() {
        return vec![empty_assignment(slots)];
    }
    search.top.into_iter().map(|(_, a)| a).collect()
}

impl<'s, 'a> Backtracker<'s, 'a> {
    fn recurse(
        &mut self,
        slot: usize,
        current: &mut Assignment<'a>,
        used: &mut HashSet<Handle>,
        state: &mut VesselState,
        score: Score,
    ) {
        if Instant::now() > self.deadline {
            return;
        }
        if slot == self.candidates.len() {
            self.offer(score, current, used);
            return;
        }
        // leave the slot empty
        current[slot] = (None, 0);
        self.recurse(slot + 1, current, used, state, score);
        let remaining = self.suffix_best[slot + 1];
        for index in 0..self.candidates[slot].len() {
            let (pre_score, relic) = self.candidates[slot][index];
            if used.contains(&relic.handle) {
                continue;
            }
            if score + pre_score + remaining <= self.threshold {
                continue;
            }
            let contextual = self.scorer.context_score(relic, state);
            if score + contextual + remaining <= self.threshold {
                continue;
            }
            current[slot] = (Some(relic), contextual);
            used.insert(relic.handle);
            let placement = state.place(relic, self.data);
            self.recurse(slot + 1, current, used, state, score + contextual);
            state.unplace(&placement);
            used.remove(&relic.handle);
            current[slot] = (None, 0);
        }
    }

    /// admit a complete assignment into the top list when it beats the
    /// current floor and its handle set is new, then trim to size
    fn offer(&mut self, score: Score, current: &Assignment<'a>, used: &HashSet<Handle>) {
        if score <= self.threshold && self.top.len() >= self.top_n {
            return;
        }
        let key = used.iter().copied().collect::<BTreeSet<Handle>>();
        if self.seen.contains(&key) {
            return;
        }
        self.seen.insert(key);
        self.top.push((score, current.clone()));
        self.top.sort_by(|a, b| b.0.cmp(&a.0));
        if self.top.len() > self.top_n {
            let (_, dropped) = self.top.pop().expect("just checked length");
            self.seen.remove(&handle_set(&dropped));
        }
        self.threshold = if self.top.len() == self.top_n {
            self.top.last().map(|(score, _)| *score).unwrap_or(-1)
        } else {
            -1
        };
    }
}
