use crate::cards::Card;
use crate::cards::CardContext;
use crate::state::StateId;
use crate::NotebookCtx;

type StatefulCardFn<T> = dyn FnMut(&mut CardContext, &mut T);

pub struct StatefulCard<T> {
    state: StateId<T>,
    function: Box<StatefulCardFn<T>>,
}

impl<T: Send + Sync + 'static> Card for StatefulCard<T> {
    fn draw(&mut self, ctx: &mut CardContext) {
        // The write guard lives only for this call, so later cards can read the value.
        let mut current = self.state.read_mut_in(ctx.store());
        (self.function)(ctx, &mut *current);
    }
}

pub fn stateful_card<T: Send + Sync + 'static>(
    nb: &mut NotebookCtx,
    key: &str,
    init: T,
    function: impl FnMut(&mut CardContext, &mut T) + 'static,
) -> StateId<T> {
    let state = nb.state_store.get_or_insert(egui::Id::new(key), init);
    nb.push(Box::new(StatefulCard {
        state,
        function: Box::new(function),
    }));
    state
}
