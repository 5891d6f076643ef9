//! A persistent lookahead tree over the moves of a game
//!
//! The tree expands every legal continuation a fixed number of plies ahead
//! of the current position and is kept across turns: once a move is played
//! its subtree becomes the new root and only the newly exposed frontier is
//! expanded. Two prunings keep it small:
//!
//! * lethal-move pruning drops the deciding side's moves that hand the
//!   opponent an immediate win, and any forced win discards its siblings
//! * advanced pruning (optional) keeps a single best move on each of the
//!   deciding side's plies

use log::{debug, trace, warn};

use std::fmt;

use crate::board::{column_label, Board, Player};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::{generate_metrics_for_column, TileMetrics};
use crate::strategy::{best_candidate, Candidate, Scoring};
use crate::HEIGHT;

/// State shared by one expansion pass
#[derive(Debug)]
pub(crate) struct Expansion {
    /// the side the tree is choosing moves for
    decider: Player,
    advanced_pruning: bool,
    next_id: usize,
}

impl Expansion {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Whether `mover` playing `column` lets the opponent win with the reply
pub fn is_lethal(board: &Board, column: usize, mover: Player) -> Result<bool> {
    let opponent = mover.opponent();
    let mut scratch = *board;
    let mut after = scratch.simulate(column, mover)?;

    for reply in after.possible_moves() {
        let replied = after.simulate(reply, opponent)?;
        if replied.check_win(opponent) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The moves a node keeps for `mover` after pruning
fn candidates(
    board: &Board,
    mover: Player,
    prune_for_self: bool,
    select_best: bool,
) -> Result<Vec<Candidate>> {
    let moves = board.possible_moves();

    let mut kept = Vec::with_capacity(moves.len());
    for &column in moves.iter() {
        let metrics = generate_metrics_for_column(board, mover, column)?;
        // a win ends the game, there is no reply to fear
        if prune_for_self && !metrics.winning_move && is_lethal(board, column, mover)? {
            trace!("pruned lethal move {} for {:?}", column_label(column), mover);
            continue;
        }
        kept.push(Candidate { column, metrics });
    }

    if kept.iter().any(|c| c.metrics.winning_move) {
        kept.retain(|c| c.metrics.winning_move);
    }

    if select_best {
        let scoring = Scoring::Weighted {
            moved_first: mover == Player::One,
        };
        if let Some(best) = best_candidate(&kept, scoring) {
            kept.retain(|c| c.column == best.column);
        }
    }

    // every move loses: still play something
    if kept.is_empty() {
        if let Some(&column) = moves.first() {
            kept.push(Candidate {
                column,
                metrics: generate_metrics_for_column(board, mover, column)?,
            });
        }
    }
    Ok(kept)
}

/// One move in the tree, owning the subtree of replies to it
#[derive(Clone, Debug)]
pub struct TreeNode {
    id: usize,
    column: Option<usize>,
    row: Option<usize>,
    level: usize,
    owner: Player,
    metrics: TileMetrics,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// A root standing for the position after `owner`'s last move
    fn root(id: usize, owner: Player) -> Self {
        Self {
            id,
            column: None,
            row: None,
            level: 0,
            owner,
            metrics: TileMetrics::default(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The column played to reach this node, `None` for a freshly planted root
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// The row the disc landed in
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Plies below the current root
    pub fn level(&self) -> usize {
        self.level
    }

    /// The player who made this move
    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn next_mover(&self) -> Player {
        self.owner.opponent()
    }

    pub fn metrics(&self) -> &TileMetrics {
        &self.metrics
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn child(&self, column: usize) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.column == Some(column))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Plies below this node down to its deepest descendant
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Text for a graph node: level, move and metric flags
    pub fn label(&self) -> String {
        match (self.column, self.row) {
            (Some(column), Some(row)) => format!(
                "{}) {}{} W={} T={} t={} p={} w={}",
                self.level,
                column_label(column),
                HEIGHT - row,
                self.metrics.winning_move as u8,
                self.metrics.immediate_threat as u8,
                self.metrics.minor_threat as u8,
                self.metrics.pressure,
                self.metrics.win_options,
            ),
            _ => String::from("Root"),
        }
    }

    /// Fill colour for a graph node, by the player who moved
    pub fn fill_color(&self) -> &'static str {
        if self.column.is_none() {
            return "lightgrey";
        }
        match self.owner {
            Player::One => "lightblue",
            Player::Two => "lightcoral",
        }
    }

    /// Expands this node `remaining` plies deeper
    ///
    /// `board` must hold the position reached by this node's move. Children
    /// left over from an earlier pass are descended into rather than
    /// rebuilt, so calling this again with the same depth changes nothing.
    pub(crate) fn add_layer(
        &mut self,
        board: &mut Board,
        remaining: usize,
        level: usize,
        expansion: &mut Expansion,
    ) -> Result<()> {
        if remaining == 0 || board.is_full() || self.metrics.winning_move {
            return Ok(());
        }
        let mover = self.next_mover();

        if self.children.is_empty() {
            let prune_for_self = mover == expansion.decider;
            let select_best = prune_for_self && expansion.advanced_pruning;

            for candidate in candidates(board, mover, prune_for_self, select_best)? {
                let row = board.find_row(candidate.column).ok_or(Error::ColumnFull {
                    column: candidate.column,
                })?;
                self.children.push(TreeNode {
                    id: expansion.next_id(),
                    column: Some(candidate.column),
                    row: Some(row),
                    level: level + 1,
                    owner: mover,
                    metrics: candidate.metrics,
                    children: Vec::new(),
                });
            }
        }

        for child in self.children.iter_mut() {
            let column = match child.column {
                Some(column) => column,
                None => continue,
            };
            let child_level = child.level;
            let mut next = board.simulate(column, mover)?;
            child.add_layer(&mut next, remaining - 1, child_level, expansion)?;
        }
        Ok(())
    }

    /// Shifts this subtree `plies` levels up
    fn rebase(&mut self, plies: usize) {
        self.level = self.level.saturating_sub(plies);
        for child in self.children.iter_mut() {
            child.rebase(plies);
        }
    }

    fn walk<F: FnMut(Option<usize>, &TreeNode)>(&self, parent: Option<usize>, f: &mut F) {
        f(parent, self);
        for child in self.children.iter() {
            child.walk(Some(self.id), f);
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth == 0 {
            writeln!(f, "Root Node: {}", self.label())?;
        } else {
            writeln!(f, "{}Node {}: {}", "  ".repeat(depth), self.id, self.label())?;
        }
        for child in self.children.iter() {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// The lookahead tree for one deciding player
#[derive(Debug)]
pub struct Tree {
    root: Option<TreeNode>,
    depth: usize,
    layers: usize,
    expansion: Expansion,
}

impl Tree {
    /// Builds a tree for `decider` from `board`, with `to_move` about to play
    pub fn new(board: &Board, to_move: Player, decider: Player, config: &Config) -> Result<Self> {
        config.validate()?;
        let mut tree = Self::uninitialized(decider, config);
        tree.plant(board, to_move)?;
        Ok(tree)
    }

    /// A tree without a root; everything but `plant` fails until one is planted
    pub fn uninitialized(decider: Player, config: &Config) -> Self {
        Self {
            root: None,
            depth: config.depth,
            layers: 0,
            expansion: Expansion {
                decider,
                advanced_pruning: config.advanced_pruning,
                next_id: 0,
            },
        }
    }

    /// Discards any existing tree and grows a new one from `board`
    pub fn plant(&mut self, board: &Board, to_move: Player) -> Result<()> {
        let id = self.expansion.next_id();
        self.root = Some(TreeNode::root(id, to_move.opponent()));
        self.layers = 0;
        debug!("planted tree for {:?}, {:?} to move", self.expansion.decider, to_move);
        self.grow(board, self.depth)
    }

    pub fn root(&self) -> Result<&TreeNode> {
        self.root.as_ref().ok_or(Error::Uninitialized)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn decider(&self) -> Player {
        self.expansion.decider
    }

    pub fn advanced_pruning(&self) -> bool {
        self.expansion.advanced_pruning
    }

    /// Number of `grow` calls since the tree was planted
    pub fn layers(&self) -> usize {
        self.layers
    }

    pub fn node_count(&self) -> Result<usize> {
        Ok(self.root()?.node_count())
    }

    /// Keeps only the subtree of `column` and makes it the root
    pub fn move_root_up(&mut self, column: usize) -> Result<()> {
        let root = self.root.as_mut().ok_or(Error::Uninitialized)?;
        let index = root
            .children
            .iter()
            .position(|c| c.column == Some(column))
            .ok_or(Error::UnexploredMove { column })?;

        let mut child = root.children.swap_remove(index);
        child.rebase(1);
        // the old root and every other branch go with it
        self.root = Some(child);
        debug!("moved root up to {}", column_label(column));
        Ok(())
    }

    /// Expands the tree `plies` deeper below every unexpanded node within reach
    pub fn grow(&mut self, board: &Board, plies: usize) -> Result<()> {
        let root = self.root.as_mut().ok_or(Error::Uninitialized)?;
        let mut scratch = *board;
        let level = root.level;
        root.add_layer(&mut scratch, plies, level, &mut self.expansion)?;
        self.layers += 1;
        debug!("grew tree by {} plies, {} nodes", plies, root.node_count());
        Ok(())
    }

    /// Follows a move played on the real board, `board` already containing it
    pub fn update_tree(&mut self, board: &Board, column: usize) -> Result<()> {
        let mover = self.root()?.next_mover();
        match self.move_root_up(column) {
            Ok(()) => self.grow(board, self.depth),
            Err(Error::UnexploredMove { .. }) => {
                warn!(
                    "{} was never explored, replanting the tree",
                    column_label(column)
                );
                self.plant(board, mover.opponent())
            }
            Err(err) => Err(err),
        }
    }

    /// Calls `f` on every node depth-first, with the id of its parent
    pub fn visit<F: FnMut(Option<usize>, &TreeNode)>(&self, mut f: F) -> Result<()> {
        self.root()?.walk(None, &mut f);
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => writeln!(f, "Empty tree"),
        }
    }
}
