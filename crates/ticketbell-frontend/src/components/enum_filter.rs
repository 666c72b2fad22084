use std::{collections::HashMap, rc::Rc};

use gpui::{
    App, IntoElement, ParentElement, SharedString, Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    Selectable, Sizable,
    button::{Button, ButtonVariants},
};
use ticketbell_bridge::enums::{ClosedEnum, MetadataTable, display_name, lookup};

type SelectHandler<T> = Rc<dyn Fn(Option<T>, &mut Window, &mut App)>;

/// One button of an [`EnumFilter`]. `value` is `None` for the reset option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption<T> {
    pub value: Option<T>,
    pub label: String,
    pub count: Option<usize>,
}

impl<T> FilterOption<T> {
    pub fn text(&self) -> String {
        match self.count {
            Some(count) => format!("{} ({count})", self.label),
            None => self.label.clone(),
        }
    }
}

/// Row of toggle buttons selecting at most one member of `T`, preceded by
/// an "All" button that clears the selection.
///
/// The filter does not keep its own state: it renders `selected` and reports
/// clicks through [`EnumFilter::on_select`].
pub struct EnumFilter<T: ClosedEnum> {
    id: SharedString,
    selected: Option<T>,
    metadata: Option<&'static MetadataTable<T>>,
    counts: Option<HashMap<T, usize>>,
    all_label: SharedString,
    hide_empty: bool,
    on_select: Option<SelectHandler<T>>,
}

impl<T: ClosedEnum> EnumFilter<T> {
    pub fn new(id: impl Into<SharedString>, selected: Option<T>) -> Self {
        Self {
            id: id.into(),
            selected,
            metadata: None,
            counts: None,
            all_label: "All".into(),
            hide_empty: false,
            on_select: None,
        }
    }

    /// Labels members with the table's display names.
    pub fn metadata(mut self, metadata: &'static MetadataTable<T>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Shows an occurrence count next to every option. Members missing from
    /// `counts` count as zero.
    pub fn counts(mut self, counts: HashMap<T, usize>) -> Self {
        self.counts = Some(counts);
        self
    }

    pub fn all_label(mut self, label: impl Into<SharedString>) -> Self {
        self.all_label = label.into();
        self
    }

    /// Leaves out members with a zero count. Has no effect without counts.
    /// The selected member is always kept.
    pub fn hide_empty(mut self, hide_empty: bool) -> Self {
        self.hide_empty = hide_empty;
        self
    }

    pub fn on_select(
        mut self,
        handler: impl Fn(Option<T>, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_select = Some(Rc::new(handler));
        self
    }

    fn label_for(&self, member: T) -> String {
        self.metadata
            .and_then(|table| lookup(table, member))
            .map(|entry| entry.display_name.to_string())
            .unwrap_or_else(|| display_name::<T>(member.name()))
    }

    /// The options in display order: "All" first, then members in
    /// declaration order.
    pub fn options(&self) -> Vec<FilterOption<T>> {
        let count_of = |member: T| {
            self.counts
                .as_ref()
                .map(|counts| counts.get(&member).copied().unwrap_or(0))
        };

        let all = FilterOption {
            value: None,
            label: self.all_label.to_string(),
            count: self.counts.as_ref().map(|counts| counts.values().sum()),
        };

        let members = T::MEMBERS
            .iter()
            .copied()
            .filter(|member| {
                !self.hide_empty
                    || self.selected == Some(*member)
                    || count_of(*member).is_none_or(|count| count > 0)
            })
            .map(|member| FilterOption {
                value: Some(member),
                label: self.label_for(member),
                count: count_of(member),
            });

        std::iter::once(all).chain(members).collect()
    }
}

impl<T: ClosedEnum> IntoElement for EnumFilter<T> {
    type Element = gpui::Component<Self>;

    fn into_element(self) -> Self::Element {
        gpui::Component::new(self)
    }
}

impl<T: ClosedEnum> gpui::RenderOnce for EnumFilter<T> {
    fn render(self, _: &mut Window, _: &mut App) -> impl IntoElement {
        let options = self.options();

        div()
            .flex()
            .flex_wrap()
            .gap_2()
            .children(options.into_iter().enumerate().map(|(index, option)| {
                let selected = option.value == self.selected;
                let on_select = self.on_select.clone();
                let value = option.value;

                Button::new(SharedString::from(format!("{}-{index}", self.id)))
                    .small()
                    .label(option.text())
                    .selected(selected)
                    .when_else(selected, |this| this.primary(), |this| this.outline())
                    .when_some(on_select, |this, on_select| {
                        this.on_click(move |_, window, cx| on_select(value, window, cx))
                    })
            }))
    }
}
