use charming::{
    component::{
        Axis, DataView, Feature, Grid, Legend, LegendSelectedMode, Restore, SaveAsImage, Title,
        Toolbox,
    },
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, Label, LabelPosition,
        NameLocation, Orient, SplitLine, TextAlign, TextStyle, Tooltip, Trigger,
    },
    series::Bar,
    Chart,
};

pub struct EchoChart {
    pub inner: Chart,
}

const AXIS_TEXT_SIZE: u32 = 16;

impl EchoChart {
    /// Create a bar chart with title, axis tooltip, legend, grid and toolbox.
    pub fn new(title: &str, subtext: &str, dark: bool) -> Self {
        let chart = Chart::new()
            .title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Axis)
                    .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
            )
            .legend(
                Legend::new()
                    .show(true)
                    .right("2%")
                    .top("middle")
                    .orient(Orient::Vertical)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .item_gap(10),
            )
            .grid(Grid::new().left("8%").right("20%").top("16%").bottom("10%"))
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if dark {
            chart.background_color("#242424")
        } else {
            chart
        };

        Self { inner: chart }
    }

    /// Configure the X axis with one category per benchmark column.
    pub fn with_category_x_axis(mut self, axis_label: &str, categories: Vec<String>) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .data(categories),
        );
        self
    }

    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .position("left")
                .axis_label(AxisLabel::new())
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Add one bar per category for a single client, labeled with its value.
    pub fn add_bar_series(mut self, name: &str, data: Vec<f64>, color: Option<&str>) -> Self {
        let mut bar = Bar::new()
            .name(name)
            .data(data)
            .label(Label::new().show(true).position(LabelPosition::Top));

        if let Some(color) = color {
            bar = bar.item_style(ItemStyle::new().color(color));
        }

        self.inner = self.inner.series(bar);
        self
    }
}
