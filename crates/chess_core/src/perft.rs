use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts the leaf positions reachable in exactly `depth` legal plies.
/// One move buffer is allocated per ply up front and reused.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn walk(pos: &mut Position, buffers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, deeper)) = buffers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(pos, buf);
        if deeper.is_empty() {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv);
            nodes += walk(pos, deeper);
            pos.unmake_move(mv, undo);
        }
        nodes
    }

    let mut buffers = vec![Vec::with_capacity(64); depth as usize];
    walk(pos, &mut buffers)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::new();
    legal_moves_into(pos, &mut roots);
    roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}
