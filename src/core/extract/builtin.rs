//! Framework-provided component names.
//!
//! JSX tags with these names are never treated as custom components, even if
//! they are imported (they come from `@tarojs/components`).

pub const BUILTIN_COMPONENTS: &[&str] = &[
    "View",
    "ScrollView",
    "Swiper",
    "CoverView",
    "CoverImage",
    "Icon",
    "Text",
    "RichText",
    "Progress",
    "Button",
    "Checkbox",
    "Form",
    "Input",
    "Label",
    "Picker",
    "PickerView",
    "PickerViewColumn",
    "Radio",
    "RadioGroup",
    "CheckboxGroup",
    "Slider",
    "Switch",
    "Textarea",
    "Navigator",
    "Audio",
    "Image",
    "Video",
    "Camera",
    "LivePlayer",
    "LivePusher",
    "Map",
    "Canvas",
    "OpenData",
    "WebView",
    "SwiperItem",
    "MovableArea",
    "MovableView",
    "FunctionalPageNavigator",
    "Ad",
    "Block",
    "Import",
    "OfficialAccount",
    "Template",
    "Editor",
];

pub fn is_builtin_component(tag_name: &str) -> bool {
    BUILTIN_COMPONENTS.contains(&tag_name)
}
