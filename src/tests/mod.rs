//! 单元测试模块
//! 覆盖文档树、图标渲染、下拉菜单、剪贴板、接口客户端、图表与设置页

pub mod support;

pub mod api_tests;
pub mod chart_tests;
pub mod dropdown_tests;
pub mod icon_tests;
