//! The fixed boiler-shift-manager rubric, embedded as static configuration.
//!
//! The rubric is identical for every evaluation; there is no versioning and
//! no runtime authoring. Display short names are a static lookup keyed by
//! category id so charts and tables never have to parse the numbered
//! Vietnamese headings.

use std::collections::BTreeMap;

use super::domain::{Criterion, KpiCategory, KpiItem, RatingLevel, Rubric};

/// Short display label for a category, keyed by id with a prefix-stripping
/// fallback for ids the table does not know.
pub fn short_name(category_id: &str, category_name: &str) -> String {
    match category_id {
        "cat_1" => "Vận hành".to_string(),
        "cat_2" => "An toàn".to_string(),
        "cat_3" => "Thiết bị".to_string(),
        "cat_4" => "Nhân sự".to_string(),
        _ => category_name
            .split_once(". ")
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_else(|| category_name.to_string()),
    }
}

fn criterion(level: RatingLevel, description: &str, score_percent: f64) -> (RatingLevel, Criterion) {
    (
        level,
        Criterion {
            label: level.label().to_string(),
            description: description.to_string(),
            score_percent,
        },
    )
}

fn criteria(good: (&str, f64), average: (&str, f64), weak: (&str, f64)) -> BTreeMap<RatingLevel, Criterion> {
    BTreeMap::from([
        criterion(RatingLevel::Good, good.0, good.1),
        criterion(RatingLevel::Average, average.0, average.1),
        criterion(RatingLevel::Weak, weak.0, weak.1),
    ])
}

fn item(
    id: &str,
    name: &str,
    max_points: f64,
    checklist: [&str; 3],
    criteria: BTreeMap<RatingLevel, Criterion>,
) -> KpiItem {
    KpiItem {
        id: id.to_string(),
        code: id.to_string(),
        name: name.to_string(),
        max_points,
        checklist: checklist.iter().map(|entry| entry.to_string()).collect(),
        criteria,
    }
}

/// The full monthly review rubric: 4 categories, 12 items, 100 points.
pub fn boiler_shift_manager() -> Rubric {
    Rubric::new(vec![
        KpiCategory {
            id: "cat_1".to_string(),
            name: "1. VẬN HÀNH".to_string(),
            items: vec![
                item(
                    "1.1",
                    "Quản lý nhà máy",
                    10.0,
                    [
                        "Điều hành toàn bộ hoạt động của nhà máy ổn định, hiệu quả và đúng kế hoạch",
                        "Giám sát dây chuyền vận hành liên tục, xử lý kịp thời khi có biến động",
                        "Phân tích rủi ro, triển khai biện pháp phòng ngừa và tối ưu hiệu suất",
                    ],
                    criteria(
                        ("Hoàn thành 100% kế hoạch", 1.0),
                        ("95–99% kế hoạch", 0.7),
                        ("<95% kế hoạch", 0.5),
                    ),
                ),
                item(
                    "1.2",
                    "Kiểm soát sự cố",
                    10.0,
                    [
                        "Theo dõi các ca vận hành, chủ động điều chỉnh khi có dấu hiệu bất thường",
                        "Chỉ đạo xử lý sự cố đúng quy trình, đảm bảo an toàn và hạn chế tổn thất",
                        "Phân tích nguyên nhân gốc rễ và triển khai biện pháp ngăn ngừa tái diễn",
                    ],
                    criteria(
                        ("Không có gián đoạn cấp hơi", 1.0),
                        ("Có sự cố, nhưng không phải bồi thường", 0.8),
                        ("Để xảy ra sự gián đoạn cấp hơi phải bồi thường", 0.0),
                    ),
                ),
                item(
                    "1.3",
                    "Chất lượng dịch vụ",
                    8.0,
                    [
                        "Đảm bảo chất lượng hơi đầu ra ổn định theo tiêu chuẩn khách hàng",
                        "Giám sát áp suất, nhiệt độ, chất lượng đạt chuẩn",
                        "Không để phát sinh khiếu nại hoặc phản ánh tiêu cực từ khách hàng",
                    ],
                    criteria(
                        ("Ổn định, không có khiếu nại của khách hàng", 1.0),
                        ("Có chênh lệch nhỏ so với tiêu chuẩn", 0.8),
                        ("Bị khách hàng phản ánh về chất lượng", 0.0),
                    ),
                ),
                item(
                    "1.4",
                    "Kiểm soát tiêu hao",
                    8.0,
                    [
                        "Giám sát tiêu hao nhiên liệu theo ca/kíp và phát hiện chênh lệch bất thường",
                        "Theo dõi tiêu hao điện, nước, hóa chất và cảnh báo khi vượt định mức",
                        "Triển khai giải pháp tối ưu hóa hiệu suất đốt để giảm lãng phí",
                    ],
                    criteria(
                        ("Tiêu hao nhiên liệu ≤ định mức", 1.0),
                        ("Vượt định mức cho phép (+1–5%)", 0.7),
                        ("Vượt quá định mức cho phép (>10%)", 0.0),
                    ),
                ),
            ],
        },
        KpiCategory {
            id: "cat_2".to_string(),
            name: "2. AN TOÀN".to_string(),
            items: vec![
                item(
                    "2.1",
                    "An toàn – PCCC – Môi trường",
                    10.0,
                    [
                        "Giám sát tuân thủ đầy đủ quy định ATLĐ và PCCC theo ca/kíp",
                        "Kiểm soát khí thải, nước thải đảm bảo đạt chuẩn môi trường",
                        "Chỉ đạo khắc phục ngay khi có vi phạm và tổ chức huấn luyện lại",
                    ],
                    criteria(
                        ("Không có sự cố Khí Thải, ATLĐ & PCCC", 1.0),
                        ("Có vi phạm nhỏ, đã khắc phục ngay", 0.7),
                        ("Vi phạm nghiêm trọng hoặc tái diễn nhiều lần", 0.0),
                    ),
                ),
                item(
                    "2.2",
                    "Kỷ luật – BHLĐ – Giám sát nội quy",
                    8.0,
                    [
                        "Giám sát việc sử dụng đầy đủ PPE/BHLĐ trong toàn bộ thời gian làm việc",
                        "Kiểm soát tuân thủ nội quy, thời gian làm việc và khu vực hạn chế",
                        "Xử lý vi phạm đúng thẩm quyền và báo cáo kịp thời cho cấp trên",
                    ],
                    criteria(
                        ("Đảm bảo 100% nhân sự tuân thủ nội quy", 1.0),
                        ("Nhắc nhở một số trường hợp vi phạm nhỏ", 0.6),
                        ("Có nhân sự vi phạm kỷ luật nghiêm trọng", 0.0),
                    ),
                ),
            ],
        },
        KpiCategory {
            id: "cat_3".to_string(),
            name: "3. THIẾT BỊ".to_string(),
            items: vec![
                item(
                    "3.1",
                    "Giám sát kiểm tra máy móc, hạ tầng",
                    8.0,
                    [
                        "Thực hiện kiểm tra – đánh giá hạ tầng nhà máy theo tần suất định kỳ",
                        "Kiểm tra tình trạng thiết bị lò hàng ngày và ghi nhận đầy đủ",
                        "Phát hiện sớm hư hỏng và đề xuất sửa chữa kịp thời",
                    ],
                    criteria(
                        ("Thực hiện kiểm tra đầy đủ 100% theo lịch tháng", 1.0),
                        ("Thực hiện kiểm tra đạt 70–80% kế hoạch", 0.7),
                        ("Thực hiện kiểm tra dưới 70% kế hoạch", 0.3),
                    ),
                ),
                item(
                    "3.2",
                    "Tuân thủ PM/CM – quản lý bảo trì",
                    6.0,
                    [
                        "Tổ chức và tuân thủ bảo trì định kỳ theo kế hoạch (ngưng 24 giờ theo HĐ)",
                        "Nghiệm thu chất lượng bảo trì theo tiêu chuẩn kỹ thuật",
                        "Đề xuất thay thế hoặc nâng cấp thiết bị khi có dấu hiệu suy giảm",
                    ],
                    criteria(
                        ("Hoàn thành ≥98% hạng mục bảo trì", 1.0),
                        ("Hoàn thành 70–80% hạng mục bảo trì", 0.7),
                        ("Không ngừng máy bảo trì đúng HĐ", 0.0),
                    ),
                ),
                item(
                    "3.3",
                    "Kiểm soát 5S",
                    6.0,
                    [
                        "Phát hiện và ghi nhận sai phạm 5S của các ca/kíp",
                        "Xử lý báo cáo đúng mức độ và đúng thời gian yêu cầu",
                        "Huấn luyện lại và đề xuất cải tiến khi lỗi tái diễn",
                    ],
                    criteria(
                        ("Kiểm soát tốt 5S, không lỗi tái diễn", 1.0),
                        ("Còn lỗi vi phạm nhẹ, ít tái diễn", 0.7),
                        ("5S không đạt, lỗi tái diễn thường xuyên", 0.0),
                    ),
                ),
                item(
                    "3.4",
                    "Báo cáo bảo trì, thiết bị định kỳ và đột xuất",
                    10.0,
                    [
                        "Gửi đầy đủ báo cáo tổng hợp tuần/tháng đúng thời hạn",
                        "Báo cáo chi tiết tình trạng thiết bị – bảo trì định kỳ và đột xuất",
                        "Phân tích xu hướng hư hỏng và cảnh báo nguy cơ trước khi xảy ra",
                    ],
                    criteria(
                        ("Báo cáo đầy đủ, chính xác và đúng thời hạn", 1.0),
                        ("Báo cáo trễ nhẹ hoặc phải nhắc nhở", 0.8),
                        ("Không gửi báo cáo hoặc báo cáo không đúng", 0.0),
                    ),
                ),
            ],
        },
        KpiCategory {
            id: "cat_4".to_string(),
            name: "4. NHÂN SỰ".to_string(),
            items: vec![
                item(
                    "4.1",
                    "Quản lý nhân sự",
                    10.0,
                    [
                        "Sắp xếp – điều phối nhân sự đảm bảo đủ quân số cho mọi ca",
                        "Xử lý nghỉ đột xuất hoặc thiếu người mà không ảnh hưởng vận hành",
                        "Đánh giá năng lực – thái độ và đề xuất luân chuyển phù hợp",
                    ],
                    criteria(
                        ("Đảm bảo đủ nhân sự, không trống ca", 1.0),
                        ("Thiếu hụt nhân sự nhưng đã xử lý ổn thỏa", 0.7),
                        ("Thiếu nhân sự gây ảnh hưởng vận hành", 0.4),
                    ),
                ),
                item(
                    "4.2",
                    "Đào tạo",
                    6.0,
                    [
                        "Đào tạo nhân viên mới và nhân viên chuyển vị trí (có hồ sơ đào tạo)",
                        "Truyền đạt đầy đủ quy trình và các thay đổi mới",
                        "Đánh giá năng lực định kỳ và huấn luyện sau sự cố",
                    ],
                    criteria(
                        ("100% nhân viên mới được đào tạo đạt yêu cầu", 1.0),
                        ("Đào tạo đạt yêu cầu ở mức khá (70-94%)", 0.7),
                        ("Công tác đào tạo chưa đạt yêu cầu (<70%)", 0.0),
                    ),
                ),
            ],
        },
    ])
}
