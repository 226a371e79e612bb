/// Per-widget override of the style otherwise derived from the global theme.
pub trait Styled {
    type Style: Clone;

    fn set_style(&mut self, style: Option<Self::Style>);

    fn styled(mut self, style: Self::Style) -> Self
    where
        Self: Sized,
    {
        self.set_style(Some(style));
        self
    }
}
