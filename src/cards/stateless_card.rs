use crate::cards::Card;
use crate::cards::CardContext;
use crate::NotebookCtx;

type StatelessCardFn = dyn FnMut(&mut CardContext);

pub struct StatelessCard {
    function: Box<StatelessCardFn>,
}

impl Card for StatelessCard {
    fn draw(&mut self, ctx: &mut CardContext) {
        (self.function)(ctx);
    }
}

pub fn stateless_card(nb: &mut NotebookCtx, function: impl FnMut(&mut CardContext) + 'static) {
    nb.push(Box::new(StatelessCard {
        function: Box::new(function),
    }));
}
