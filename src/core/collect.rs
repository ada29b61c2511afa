//! Marker collection: fold the markers of one round into one record per bound class.
//!
//! A class is *bound* when it carries a content-view marker. View-id, click and
//! long-click markers are discovered independently and joined to their bound class
//! by enclosing-class identity. Markers whose enclosing class is not bound cannot be
//! emitted anywhere; they are set aside as [`DroppedMarker`]s so the caller decides
//! whether to report them.

use std::collections::HashMap;

use super::element::{
    ClassElement, ClassId, FieldElement, Marker, MethodElement, RoundEnvironment,
};

/// A field bound to a view by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewField<'a> {
    pub element: &'a FieldElement,
    pub id: i32,
}

/// A method bound as a listener on one or more views.
///
/// The ids stay together on one entry. Emission fans them out into one
/// registration per id, all calling the same method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerMethod<'a> {
    pub element: &'a MethodElement,
    pub ids: &'a [i32],
}

/// Everything needed to render one `_ViewBinding` class.
///
/// Every field and method in the collections is enclosed by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRecord<'a> {
    pub owner: &'a ClassElement,
    pub layout_id: i32,
    pub view_fields: Vec<ViewField<'a>>,
    pub click_methods: Vec<ListenerMethod<'a>>,
    pub long_click_methods: Vec<ListenerMethod<'a>>,
}

impl<'a> BindingRecord<'a> {
    fn new(owner: &'a ClassElement, layout_id: i32) -> Self {
        Self {
            owner,
            layout_id,
            view_fields: Vec::new(),
            click_methods: Vec::new(),
            long_click_methods: Vec::new(),
        }
    }
}

/// A marker whose enclosing class carries no content-view marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedMarker<'a> {
    pub marker: Marker,
    /// Simple name of the field or method carrying the marker.
    pub element_name: &'a str,
    pub enclosing_class: &'a ClassId,
}

/// Output of one collection pass.
#[derive(Debug, Default)]
pub struct Collection<'a> {
    /// One record per bound class, in discovery order.
    pub records: Vec<BindingRecord<'a>>,
    /// Markers that no record could take, in discovery order.
    pub dropped: Vec<DroppedMarker<'a>>,
}

/// Groups markers by owning class while preserving discovery order.
struct RecordBuilder<'a> {
    index: HashMap<&'a ClassId, usize>,
    records: Vec<BindingRecord<'a>>,
    dropped: Vec<DroppedMarker<'a>>,
}

impl<'a> RecordBuilder<'a> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            records: Vec::new(),
            dropped: Vec::new(),
        }
    }

    fn bind_class(&mut self, class: &'a ClassElement) {
        let Some(layout_id) = class.content_view else {
            return;
        };
        if self.index.contains_key(&class.id) {
            return;
        }
        self.index.insert(&class.id, self.records.len());
        self.records.push(BindingRecord::new(class, layout_id));
    }

    /// Record for `owner`, or note the marker as dropped.
    fn record_for(
        &mut self,
        owner: &'a ClassId,
        marker: Marker,
        element_name: &'a str,
    ) -> Option<&mut BindingRecord<'a>> {
        match self.index.get(owner) {
            Some(&idx) => self.records.get_mut(idx),
            None => {
                self.dropped.push(DroppedMarker {
                    marker,
                    element_name,
                    enclosing_class: owner,
                });
                None
            }
        }
    }

    fn add_view_field(&mut self, field: &'a FieldElement) {
        let Some(id) = field.view_id else {
            return;
        };
        if let Some(record) =
            self.record_for(&field.enclosing_class, Marker::ViewId, &field.simple_name)
        {
            record.view_fields.push(ViewField { element: field, id });
        }
    }

    fn add_click_method(&mut self, method: &'a MethodElement) {
        let Some(ids) = method.on_click.as_deref() else {
            return;
        };
        if let Some(record) =
            self.record_for(&method.enclosing_class, Marker::OnClick, &method.simple_name)
        {
            record.click_methods.push(ListenerMethod {
                element: method,
                ids,
            });
        }
    }

    fn add_long_click_method(&mut self, method: &'a MethodElement) {
        let Some(ids) = method.on_long_click.as_deref() else {
            return;
        };
        if let Some(record) = self.record_for(
            &method.enclosing_class,
            Marker::OnLongClick,
            &method.simple_name,
        ) {
            record.long_click_methods.push(ListenerMethod {
                element: method,
                ids,
            });
        }
    }

    fn finish(self) -> Collection<'a> {
        Collection {
            records: self.records,
            dropped: self.dropped,
        }
    }
}

/// Collect one [`BindingRecord`] per content-view class of the round.
///
/// Four passes over the environment: content-view classes first, then view-id
/// fields, click methods and long-click methods. Never fails.
pub fn collect_bindings<E: RoundEnvironment + ?Sized>(env: &E) -> Collection<'_> {
    let mut builder = RecordBuilder::new();

    for class in env.content_view_classes() {
        builder.bind_class(class);
    }
    for field in env.view_id_fields() {
        builder.add_view_field(field);
    }
    for method in env.click_methods() {
        builder.add_click_method(method);
    }
    for method in env.long_click_methods() {
        builder.add_long_click_method(method);
    }

    builder.finish()
}
